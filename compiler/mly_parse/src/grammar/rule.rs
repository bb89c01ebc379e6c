//! Rules section.
//!
//! ```text
//! rule        = { "%public" | "%inline" } nonterminal [ formals ] ":" [ "|" ] alternative { "|" alternative } .
//! formals     = "(" symbol { [","] symbol } ")" .
//! alternative = { producer } [ precedence ] [ action ] [ precedence ] .
//! producer    = [ lident "=" ] actual { attribute } .
//! precedence  = "%prec" symbol .
//! action      = "{" OCAML "}" .
//! ```
//!
//! Rules have no terminator (`;` is trivia), so where one rule ends is only
//! known by spotting the head of the next: an identifier, optionally with
//! formals, followed by `:`. That check runs on a lexer snapshot.

use mly_ir::SyntaxKind;
use mly_lexer::ScanMode;
use tracing::trace;

use crate::recovery::{TokenSet, ALTERNATIVE_FOLLOW, RULE_BOUNDARY, RULE_FLAGS, SUFFIX, SYMBOL};
use crate::{PResult, Parser};

impl Parser<'_> {
    pub(super) fn rule(&mut self) -> PResult {
        self.start(SyntaxKind::Rule);
        while self.at_set(RULE_FLAGS) {
            self.token();
        }
        if !self.at(SyntaxKind::Lident) {
            return Err(self.missing(TokenSet::single(SyntaxKind::Lident)));
        }
        self.token_as(SyntaxKind::Nonterminal);
        if self.at(SyntaxKind::LParen) {
            self.formals()?;
        }
        if !self.at(SyntaxKind::Colon) {
            return Err(self.missing(
                TokenSet::single(SyntaxKind::Colon).with(SyntaxKind::LParen),
            ));
        }
        self.token();
        if self.at(SyntaxKind::Pipe) {
            self.token();
        }
        self.alternative()?;
        while self.at(SyntaxKind::Pipe) {
            self.token();
            self.alternative()?;
        }
        self.finish_node();

        // Only the head of another rule may follow.
        if self.at_set(RULE_BOUNDARY) || self.at(SyntaxKind::Lident) {
            Ok(())
        } else {
            Err(self.unexpected(ALTERNATIVE_FOLLOW))
        }
    }

    fn formals(&mut self) -> PResult {
        self.start(SyntaxKind::Formals);
        let open = self.token();
        self.list(SYMBOL, true, |p| {
            p.symbol();
            Ok(())
        })?;
        self.expect_close(open.span)?;
        self.finish_node();
        Ok(())
    }

    fn alternative(&mut self) -> PResult {
        self.start(SyntaxKind::Alternative);
        while self.at_set(SYMBOL) && !self.at_rule_start() {
            self.producer()?;
        }
        if self.at(SyntaxKind::PrecKw) {
            self.precedence()?;
        }
        if self.at(SyntaxKind::LBrace) {
            self.action()?;
            if self.at(SyntaxKind::PrecKw) {
                self.precedence()?;
            }
        }
        self.finish_node();
        Ok(())
    }

    fn producer(&mut self) -> PResult {
        self.start(SyntaxKind::Producer);
        if self.at(SyntaxKind::Lident) && self.at_binding() {
            self.token_as(SyntaxKind::Binding);
            self.token();
        }
        self.actual()?;
        self.attributes()?;
        self.finish_node();
        Ok(())
    }

    fn precedence(&mut self) -> PResult {
        self.start(SyntaxKind::Precedence);
        self.token();
        if !self.at_set(SYMBOL) {
            return Err(self.missing(SYMBOL));
        }
        self.symbol();
        self.finish_node();
        Ok(())
    }

    fn action(&mut self) -> PResult {
        self.start(SyntaxKind::Action);
        let open = self.token();
        self.foreign(ScanMode::SemanticAction, open.span, SyntaxKind::Ocaml)?;
        self.expect(SyntaxKind::RBrace)?;
        self.finish_node();
        Ok(())
    }

    /// `x =` ahead.
    fn at_binding(&mut self) -> bool {
        let snapshot = self.lexer.snapshot();
        self.lexer.bump();
        let result = self.lexer.at(SyntaxKind::Equals);
        self.lexer.restore(snapshot);
        result
    }

    /// Whether a rule head starts at the lookahead:
    /// flags, a lowercase name, balanced formals, then `:`.
    pub(crate) fn at_rule_start(&mut self) -> bool {
        let snapshot = self.lexer.snapshot();
        let result = self.scan_rule_head();
        self.lexer.restore(snapshot);
        if result {
            trace!(at = self.lexer.current().span.start, "rule head");
        }
        result
    }

    fn scan_rule_head(&mut self) -> bool {
        while self.at_set(RULE_FLAGS) {
            self.lexer.bump();
        }
        if !self.at(SyntaxKind::Lident) {
            return false;
        }
        self.lexer.bump();
        if self.at(SyntaxKind::LParen) {
            let mut depth = 0u32;
            loop {
                match self.kind() {
                    SyntaxKind::LParen => depth += 1,
                    SyntaxKind::RParen => depth -= 1,
                    SyntaxKind::Comma => {}
                    kind if SYMBOL.contains(kind) || SUFFIX.contains(kind) => {}
                    _ => return false,
                }
                self.lexer.bump();
                if depth == 0 {
                    break;
                }
            }
        }
        self.at(SyntaxKind::Colon)
    }
}
