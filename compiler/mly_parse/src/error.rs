//! Syntax errors and their diagnostics.
//!
//! A [`ParseError`] records where the recognizer gave up and what it was
//! looking for. Errors about a missing piece are anchored at the end of the
//! preceding token rather than at whatever follows, so `%token %% %%`
//! reports offset 6, right after `%token`.

use mly_diagnostic::{Diagnostic, ErrorCode};
use mly_ir::{Span, SyntaxKind};
use mly_lexer::LexError;
use thiserror::Error;

use crate::recovery::{describe, TokenSet};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// A token that cannot start or continue anything at this position.
    #[error("expected {expected}, found {}", found_name(.found))]
    UnexpectedToken {
        span: Span,
        expected: TokenSet,
        found: SyntaxKind,
    },
    /// Bytes that start no token, met where a token was expected.
    #[error("invalid character {text:?}")]
    InvalidCharacter { span: Span, text: Box<str> },
    /// A required element is absent.
    #[error("expected {expected} after this, found {}", found_name(.found))]
    MissingElement {
        at: u32,
        expected: TokenSet,
        found: SyntaxKind,
    },
    /// `(` without its `)`.
    #[error("unclosed `(`: expected `)`, found {}", found_name(.found))]
    UnclosedDelimiter {
        open: Span,
        at: u32,
        found: SyntaxKind,
    },
    /// End of input inside the declarations section.
    #[error("missing `%%` between the declarations and the rules")]
    MissingSeparator { at: u32 },
    /// `%name` that no declaration starts with.
    #[error("unknown directive `{name}`")]
    UnknownDirective { span: Span, name: Box<str> },
}

fn found_name(kind: &SyntaxKind) -> String {
    describe(*kind)
}

impl ParseError {
    /// Byte offset the error is reported at.
    pub fn offset(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidCharacter { span, .. }
            | ParseError::UnknownDirective { span, .. } => span.start,
            ParseError::MissingElement { at, .. }
            | ParseError::UnclosedDelimiter { at, .. }
            | ParseError::MissingSeparator { at } => *at,
        }
    }

    /// Primary span: the offending token, or a point where something is missing.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidCharacter { span, .. }
            | ParseError::UnknownDirective { span, .. } => *span,
            ParseError::MissingElement { at, .. }
            | ParseError::UnclosedDelimiter { at, .. }
            | ParseError::MissingSeparator { at } => Span::point(*at),
        }
    }

    /// Kinds that would have been accepted.
    pub fn expected(&self) -> TokenSet {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::MissingElement { expected, .. } => *expected,
            ParseError::InvalidCharacter { .. } => TokenSet::new(),
            ParseError::UnclosedDelimiter { .. } => TokenSet::single(SyntaxKind::RParen),
            ParseError::MissingSeparator { .. } => TokenSet::single(SyntaxKind::PercentPercent),
            ParseError::UnknownDirective { .. } => crate::recovery::DECLARATION_START,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseError::InvalidCharacter { .. } => ErrorCode::E0005,
            ParseError::MissingElement { .. } => ErrorCode::E1002,
            ParseError::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseError::MissingSeparator { .. } => ErrorCode::E1004,
            ParseError::UnknownDirective { .. } => ErrorCode::E1005,
        }
    }

    /// Render as a coded diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            ParseError::UnexpectedToken { span, .. } => diag.with_label(*span, "unexpected here"),
            ParseError::InvalidCharacter { span, .. } => diag
                .with_label(*span, "not part of any token")
                .with_note("OCaml code belongs inside `%{ %}`, `{ }`, `< >` or `[@ ]`"),
            ParseError::MissingElement { at, expected, .. } => {
                diag.with_label(Span::point(*at), format!("expected {expected}"))
            }
            ParseError::UnclosedDelimiter { open, at, .. } => diag
                .with_label(Span::point(*at), "expected `)`")
                .with_secondary_label(*open, "unclosed delimiter"),
            ParseError::MissingSeparator { at } => diag
                .with_label(Span::point(*at), "input ends here")
                .with_note("a grammar file needs `%%` after its declarations, even with no rules"),
            ParseError::UnknownDirective { span, .. } => diag
                .with_label(*span, "not a declaration keyword")
                .with_note(format!("declarations start with {}", crate::recovery::DECLARATION_START)),
        }
    }
}

/// Any error that stops a strict parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn offset(&self) -> u32 {
        match self {
            SyntaxError::Lex(err) => err.offset(),
            SyntaxError::Parse(err) => err.offset(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span(),
            SyntaxError::Parse(err) => err.span(),
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, SyntaxError::Lex(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SyntaxError::Lex(err) => err.code(),
            SyntaxError::Parse(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::Lex(err) => err.to_diagnostic(),
            SyntaxError::Parse(err) => err.to_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests;
