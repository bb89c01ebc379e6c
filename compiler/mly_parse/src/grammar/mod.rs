//! Grammar productions.
//!
//! The recognizer is a three-phase state machine:
//!
//! ```text
//! grammar_specification = declaration* "%%" rule* [ "%%" epilogue ] .
//! ```
//!
//! Each phase loops over its items. A failing item returns
//! [`ErrorReported`]; the phase loop closes whatever the item left open and
//! either stops (strict mode, lexical errors) or skips to the next boundary.

mod actual;
mod declaration;
mod rule;

use mly_ir::SyntaxKind;
use tracing::debug;

use crate::recovery::{TokenSet, DECLARATION_START, RULE_FLAGS};
use crate::{ErrorReported, PResult, ParseError, Parser};

/// Depth of the root node; items are opened below it.
const ITEM_DEPTH: usize = 1;

impl Parser<'_> {
    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn grammar_specification(&mut self) {
        self.start(SyntaxKind::GrammarSpecification);
        if self.declarations().is_ok() {
            self.rules();
        }
        self.builder.finish_to_depth(0);
    }

    /// Declarations up to and including the first `%%`.
    fn declarations(&mut self) -> PResult {
        debug!("declarations");
        loop {
            match self.kind() {
                SyntaxKind::PercentPercent => {
                    self.token();
                    return Ok(());
                }
                SyntaxKind::Eof => {
                    if self.lexer.error().is_none() {
                        let at = self.lexer.prev_end();
                        self.report(ParseError::MissingSeparator { at });
                    }
                    return Err(ErrorReported);
                }
                _ => {
                    if self.declaration().is_err() {
                        self.builder.finish_to_depth(ITEM_DEPTH);
                        if self.is_fatal() {
                            return Err(ErrorReported);
                        }
                        self.recover_declaration();
                    }
                }
            }
        }
    }

    /// Rules up to the end of input or the second `%%`.
    fn rules(&mut self) {
        debug!("rules");
        loop {
            match self.kind() {
                SyntaxKind::PercentPercent => {
                    self.token();
                    self.epilogue();
                    return;
                }
                SyntaxKind::Eof => return,
                kind => {
                    let result = if kind == SyntaxKind::Lident || RULE_FLAGS.contains(kind) {
                        self.rule()
                    } else {
                        Err(self.unexpected(
                            RULE_FLAGS
                                .with(SyntaxKind::Lident)
                                .with(SyntaxKind::PercentPercent),
                        ))
                    };
                    if result.is_err() {
                        self.builder.finish_to_depth(ITEM_DEPTH);
                        if self.is_fatal() {
                            return;
                        }
                        self.recover_rule();
                    }
                }
            }
        }
    }

    /// Everything after the second `%%`, verbatim.
    ///
    /// A whitespace-only remainder is trivia, not an epilogue.
    fn epilogue(&mut self) {
        let rest = self.lexer.rest();
        debug!(start = rest.start, len = rest.len(), "epilogue");
        if rest.is_empty() {
            return;
        }
        if self.is_blank(rest) {
            self.builder.trivia(SyntaxKind::Whitespace, rest);
        } else {
            self.builder.token(SyntaxKind::Epilogue, rest);
        }
    }

    fn declaration(&mut self) -> PResult {
        match self.kind() {
            SyntaxKind::HeaderOpen => self.header(),
            SyntaxKind::TokenKw => self.token_declaration(),
            SyntaxKind::StartKw => self.start_declaration(),
            SyntaxKind::TypeKw => self.type_declaration(),
            SyntaxKind::LeftKw | SyntaxKind::RightKw | SyntaxKind::NonassocKw => {
                self.priority_declaration()
            }
            SyntaxKind::ParameterKw => self.parameter_declaration(),
            SyntaxKind::Percent => self.grammar_attribute(),
            SyntaxKind::AttributeKw => self.attribute_declaration(),
            SyntaxKind::OnErrorReduceKw => self.on_error_reduce_declaration(),
            _ => Err(self.unexpected(DECLARATION_START.with(SyntaxKind::PercentPercent))),
        }
    }

    /// `item (","? item)*` when `required`, `(","? item)*` otherwise.
    ///
    /// A comma must be followed by an item.
    fn list(
        &mut self,
        first: TokenSet,
        required: bool,
        mut item: impl FnMut(&mut Self) -> PResult,
    ) -> PResult {
        let mut seen = false;
        loop {
            let comma = (seen || !required) && self.at(SyntaxKind::Comma);
            if comma {
                self.token();
            }
            if self.at_set(first) {
                item(self)?;
                seen = true;
            } else if comma || (required && !seen) {
                return Err(self.missing(first));
            } else {
                return Ok(());
            }
        }
    }
}
