//! Symbols, actuals, type annotations and attributes.
//!
//! ```text
//! actual       = symbol [ "(" actual { [","] actual } ")" ] { "?" | "+" | "*" } .
//! type         = "<" OCAML_TYPE ">" .
//! attribute    = "[@" attribute_id [ PAYLOAD ] "]" .
//! attribute_id = ident { "." ident } .
//! ```

use mly_ir::SyntaxKind;
use mly_lexer::ScanMode;
use tracing::trace;

use crate::recovery::{SUFFIX, SYMBOL};
use crate::{ErrorReported, PResult, Parser};

impl Parser<'_> {
    /// A symbol becomes one leaf whose kind follows the identifier's case.
    pub(super) fn symbol(&mut self) {
        let kind = if self.at(SyntaxKind::Uident) {
            SyntaxKind::Terminal
        } else {
            SyntaxKind::Nonterminal
        };
        self.token_as(kind);
    }

    /// Nested arguments recurse, so the descent runs on a growable stack.
    pub(super) fn actual(&mut self) -> PResult {
        mly_stack::ensure_sufficient_stack(|| self.actual_inner())
    }

    fn actual_inner(&mut self) -> PResult {
        if !self.at_set(SYMBOL) {
            return Err(self.missing(SYMBOL));
        }
        self.start(SyntaxKind::Actual);
        self.symbol();
        if self.at(SyntaxKind::LParen) {
            let open = self.token();
            self.list(SYMBOL, true, Self::actual)?;
            self.expect_close(open.span)?;
        }
        while self.at_set(SUFFIX) {
            self.token();
        }
        self.finish_node();
        Ok(())
    }

    pub(super) fn optional_type(&mut self) -> PResult {
        if self.at(SyntaxKind::Lt) {
            self.type_annotation()?;
        }
        Ok(())
    }

    /// `<` opaque OCaml type `>`; the caller has checked for `<`.
    pub(super) fn type_annotation(&mut self) -> PResult {
        self.start(SyntaxKind::Type);
        let open = self.token();
        self.foreign(ScanMode::TypeAnnotation, open.span, SyntaxKind::OcamlType)?;
        self.expect(SyntaxKind::Gt)?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn attributes(&mut self) -> PResult {
        while self.at(SyntaxKind::LBracketAt) {
            self.attribute()?;
        }
        Ok(())
    }

    /// `[@ id payload ]`; the caller has checked for `[@`.
    ///
    /// The payload is whatever lies between the id and the closing `]`. A
    /// blank payload is kept as whitespace trivia.
    pub(super) fn attribute(&mut self) -> PResult {
        self.start(SyntaxKind::Attribute);
        let open = self.token();
        self.attribute_id()?;

        let payload = self
            .lexer
            .foreign(ScanMode::AttributePayload, open.span)
            .map_err(|_| ErrorReported)?;
        if !payload.is_empty() {
            if self.is_blank(payload) {
                self.builder.trivia(SyntaxKind::Whitespace, payload);
            } else {
                trace!(start = payload.start, end = payload.end, "attribute payload");
                self.builder.token(SyntaxKind::AttributePayload, payload);
            }
        }

        self.expect(SyntaxKind::RBracket)?;
        self.finish_node();
        Ok(())
    }

    /// Dotted path of identifiers of either case. A `.` only continues the
    /// path when it directly follows a segment; anything else starts the
    /// payload.
    fn attribute_id(&mut self) -> PResult {
        self.start(SyntaxKind::AttributeId);
        loop {
            if !self.at_set(SYMBOL) {
                return Err(self.missing(SYMBOL));
            }
            self.token();
            if self.lexer.peek_byte() != b'.' {
                break;
            }
            self.expect(SyntaxKind::Dot)?;
        }
        self.finish_node();
        Ok(())
    }
}
