//! Declarations section.
//!
//! Every declaration starts with its own keyword, so dispatch needs one
//! token of lookahead.
//!
//! ```text
//! header          = "%{" OCAML "%}" .
//! token           = "%token" [ type ] terminal [ alias ] { [","] terminal [ alias ] } { attribute } .
//! start           = "%start" [ type ] nonterminal { [","] nonterminal } .
//! type_decl       = "%type" type actual { [","] actual } .
//! priority        = ( "%left" | "%right" | "%nonassoc" ) { [","] symbol } .
//! parameter       = "%parameter" "<" UIDENT ":" MODULE_TYPE ">" .
//! grammar_attr    = "%" attribute .
//! attribute_decl  = "%attribute" { [","] actual } { attribute } .
//! on_error_reduce = "%on_error_reduce" { [","] actual } .
//! ```

use mly_ir::SyntaxKind;
use mly_lexer::ScanMode;

use crate::recovery::{TokenSet, SYMBOL};
use crate::{PResult, Parser};

const TERMINAL: TokenSet = TokenSet::single(SyntaxKind::Uident);
const NONTERMINAL: TokenSet = TokenSet::single(SyntaxKind::Lident);

impl Parser<'_> {
    pub(super) fn header(&mut self) -> PResult {
        self.start(SyntaxKind::Header);
        let open = self.token();
        self.foreign(ScanMode::CodeBlock, open.span, SyntaxKind::Ocaml)?;
        self.expect(SyntaxKind::HeaderClose)?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn token_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::TokenDeclaration);
        self.token();
        self.optional_type()?;
        self.list(TERMINAL, true, |p| {
            p.token_as(SyntaxKind::Terminal);
            if p.at(SyntaxKind::String) {
                p.token_as(SyntaxKind::TokenAlias);
            }
            Ok(())
        })?;
        self.attributes()?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn start_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::StartDeclaration);
        self.token();
        self.optional_type()?;
        self.list(NONTERMINAL, true, |p| {
            p.token_as(SyntaxKind::Nonterminal);
            Ok(())
        })?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn type_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::TypeDeclaration);
        self.token();
        if !self.at(SyntaxKind::Lt) {
            return Err(self.missing(TokenSet::single(SyntaxKind::Lt)));
        }
        self.type_annotation()?;
        self.list(SYMBOL, true, Self::actual)?;
        self.finish_node();
        Ok(())
    }

    /// `%left`, `%right`, `%nonassoc`; an empty symbol list is allowed.
    pub(super) fn priority_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::PriorityDeclaration);
        self.token();
        self.list(SYMBOL, false, |p| {
            p.symbol();
            Ok(())
        })?;
        self.finish_node();
        Ok(())
    }

    /// `%parameter < M : S >`, the module type being opaque OCaml.
    pub(super) fn parameter_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::ParameterDeclaration);
        self.token();
        self.expect(SyntaxKind::Lt)?;
        if !self.at(SyntaxKind::Uident) {
            return Err(self.missing(TERMINAL));
        }
        self.token_as(SyntaxKind::ModuleName);
        let colon = self.expect(SyntaxKind::Colon)?;
        self.foreign(ScanMode::TypeAnnotation, colon.span, SyntaxKind::ModuleType)?;
        self.expect(SyntaxKind::Gt)?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn grammar_attribute(&mut self) -> PResult {
        self.start(SyntaxKind::GrammarAttribute);
        self.token();
        if !self.at(SyntaxKind::LBracketAt) {
            return Err(self.missing(TokenSet::single(SyntaxKind::LBracketAt)));
        }
        self.attribute()?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn attribute_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::AttributeDeclaration);
        self.token();
        self.list(SYMBOL, false, Self::actual)?;
        self.attributes()?;
        self.finish_node();
        Ok(())
    }

    pub(super) fn on_error_reduce_declaration(&mut self) -> PResult {
        self.start(SyntaxKind::OnErrorReduceDeclaration);
        self.token();
        self.list(SYMBOL, false, Self::actual)?;
        self.finish_node();
        Ok(())
    }
}
