//! Lexical errors.
//!
//! Every lexical error is fatal: the lexer stops producing tokens and the
//! recognizer sees end of input from the error position on. Each error
//! carries the span of the construct that could not be closed, starting at
//! its opener.

use mly_diagnostic::{Diagnostic, ErrorCode};
use mly_ir::Span;
use mly_lexer_core::{ForeignErrorKind, ScanMode};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum LexError {
    /// `/*` without `*/`.
    #[error("unterminated block comment")]
    UnterminatedBlockComment { span: Span },
    /// `(*` without its matching `*)`.
    #[error("unterminated OCaml comment")]
    UnterminatedOcamlComment { span: Span },
    /// `"` without a closing quote on the same line.
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },
    /// A header, action, type or attribute payload without its terminator.
    #[error("unterminated {}: missing `{}`", .mode.name(), .mode.terminator())]
    UnterminatedForeign {
        mode: ScanMode,
        /// From the opener to the end of input.
        span: Span,
        cause: ForeignErrorKind,
    },
    /// The source is larger than the configured budget.
    #[error("source is {len} bytes, over the limit of {max} bytes")]
    SourceTooLarge { len: usize, max: usize },
}

impl LexError {
    /// Span of the construct, from its opener onwards.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedBlockComment { span }
            | LexError::UnterminatedOcamlComment { span }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedForeign { span, .. } => *span,
            LexError::SourceTooLarge { .. } => Span::point(0),
        }
    }

    /// Byte offset the error is reported at.
    pub fn offset(&self) -> u32 {
        self.span().start
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnterminatedBlockComment { .. } => ErrorCode::E0001,
            LexError::UnterminatedOcamlComment { .. } => ErrorCode::E0002,
            LexError::UnterminatedString { .. } => ErrorCode::E0003,
            LexError::UnterminatedForeign { .. } => ErrorCode::E0004,
            LexError::SourceTooLarge { .. } => ErrorCode::E0006,
        }
    }

    /// Render as a coded diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let opener = |span: Span, len: u32| Span::new(span.start, span.end.min(span.start + len));
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match *self {
            LexError::UnterminatedBlockComment { span } => diag
                .with_label(opener(span, 2), "comment starts here")
                .with_note("block comments do not nest; the first `*/` closes them"),
            LexError::UnterminatedOcamlComment { span } => diag
                .with_label(opener(span, 2), "comment starts here")
                .with_note("OCaml comments nest; every `(*` needs its own `*)`"),
            LexError::UnterminatedString { span } => diag
                .with_label(span, "string starts here")
                .with_suggestion("add a closing `\"` before the end of the line"),
            LexError::UnterminatedForeign { mode, span, cause } => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "openers are at most two bytes"
                )]
                let opener_len = mode.opener().len() as u32;
                let diag = diag.with_label(
                    opener(span, opener_len),
                    format!("{} starts here", mode.name()),
                );
                match cause {
                    ForeignErrorKind::MissingTerminator => diag.with_suggestion(format!(
                        "add `{}` to close the {}",
                        mode.terminator(),
                        mode.name()
                    )),
                    ForeignErrorKind::UnterminatedString { at } => diag
                        .with_secondary_label(Span::point(at), "this OCaml string is never closed"),
                    ForeignErrorKind::UnterminatedComment { at } => diag
                        .with_secondary_label(Span::point(at), "this OCaml comment is never closed"),
                    ForeignErrorKind::UnterminatedQuotedString { at } => diag
                        .with_secondary_label(
                            Span::point(at),
                            "this quoted string is never closed",
                        ),
                }
            }
            LexError::SourceTooLarge { .. } => diag,
        }
    }
}
