//! Recursive descent recognizer for ocamlyacc/Menhir `.mly` files.
//!
//! Produces a lossless [`SyntaxTree`]: every byte of the input is covered by
//! a leaf or a trivia piece. The recognizer pulls tokens from
//! [`mly_lexer::Lexer`] and hands embedded OCaml (header bodies, semantic
//! actions, type annotations, attribute payloads) to the foreign scanner at
//! the exact points where the grammar expects them.
//!
//! # Phases
//!
//! ```text
//! declarations  %%  rules  [ %%  epilogue ]
//! ```
//!
//! # Entry points
//!
//! - [`parse`] is strict: the first error ends the parse.
//! - [`parse_with_options`] can recover, returning a partial tree together
//!   with every error met on the way.

mod error;
mod grammar;
mod recovery;

pub use error::{ParseError, SyntaxError};
pub use recovery::TokenSet;

use mly_ir::{Span, SyntaxKind, SyntaxTree, Token, TreeBuilder};
use mly_lexer::{LexError, Lexer, ScanMode, SourceBuffer};
use tracing::debug;

/// Largest source the recognizer accepts: offsets are `u32`.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Knobs for one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Resynchronize after a syntax error instead of stopping.
    pub recovery: bool,
    /// Inputs longer than this are rejected before scanning.
    pub max_source_len: usize,
}

impl ParseOptions {
    /// Stop at the first error.
    pub const fn strict() -> Self {
        ParseOptions {
            recovery: false,
            max_source_len: MAX_SOURCE_LEN,
        }
    }

    #[must_use]
    pub const fn with_recovery(mut self, recovery: bool) -> Self {
        self.recovery = recovery;
        self
    }

    #[must_use]
    pub const fn with_max_source_len(mut self, max: usize) -> Self {
        self.max_source_len = max;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            recovery: true,
            max_source_len: MAX_SOURCE_LEN,
        }
    }
}

/// Parse result: the tree plus every error met.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    /// Ordered by offset; a lexical error comes first on ties.
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// A tree built past errors covers the input, but parts of it sit in
    /// `Error` nodes or are missing.
    pub fn is_partial(&self) -> bool {
        self.has_errors()
    }

    /// The tree, or the earliest error.
    pub fn into_result(self) -> Result<SyntaxTree, SyntaxError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.tree),
        }
    }
}

/// Parse a grammar file, failing on the first error.
pub fn parse(source: &str) -> Result<SyntaxTree, SyntaxError> {
    parse_with_options(source, ParseOptions::strict()).into_result()
}

/// Parse a grammar file with explicit options.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), recovery = options.recovery))]
pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseOutput {
    let max = options.max_source_len.min(MAX_SOURCE_LEN);
    if source.len() > max {
        debug!(len = source.len(), max, "source over budget");
        return ParseOutput {
            tree: TreeBuilder::new().finish(source),
            errors: vec![SyntaxError::Lex(LexError::SourceTooLarge {
                len: source.len(),
                max,
            })],
        };
    }

    let buffer = SourceBuffer::new(source);
    let mut parser = Parser::new(Lexer::new(&buffer, source), options.recovery);
    parser.grammar_specification();
    parser.finish()
}

/// Marker that an error has been recorded, or that lexing failed.
#[derive(Debug)]
pub(crate) struct ErrorReported;

pub(crate) type PResult = Result<(), ErrorReported>;

/// Parser state.
pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    builder: TreeBuilder,
    errors: Vec<ParseError>,
    recovery: bool,
}

impl<'a> Parser<'a> {
    fn new(lexer: Lexer<'a>, recovery: bool) -> Self {
        Parser {
            lexer,
            builder: TreeBuilder::new(),
            errors: Vec::new(),
            recovery,
        }
    }

    fn finish(self) -> ParseOutput {
        let Parser {
            lexer,
            mut builder,
            errors,
            ..
        } = self;
        let source = lexer.source();
        let lex_error = lexer.error().copied();
        for trivia in lexer.into_trivia() {
            builder.trivia(trivia.kind, trivia.span);
        }
        let tree = builder.finish(source);

        let mut errors: Vec<SyntaxError> = errors.into_iter().map(SyntaxError::Parse).collect();
        errors.extend(lex_error.map(SyntaxError::Lex));
        errors.sort_by_key(|err| (err.offset(), !err.is_lexical()));
        ParseOutput { tree, errors }
    }

    // Lexer delegation.

    #[inline]
    fn kind(&mut self) -> SyntaxKind {
        self.lexer.kind()
    }

    #[inline]
    fn at(&mut self, kind: SyntaxKind) -> bool {
        self.lexer.at(kind)
    }

    #[inline]
    fn at_set(&mut self, set: TokenSet) -> bool {
        set.contains(self.kind())
    }

    // Tree building.

    #[inline]
    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    #[inline]
    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Consume the lookahead as a leaf of its own kind.
    fn token(&mut self) -> Token {
        let token = self.lexer.bump();
        self.builder.token(token.kind, token.span);
        token
    }

    /// Consume the lookahead as a leaf of `kind`.
    fn token_as(&mut self, kind: SyntaxKind) -> Token {
        let token = self.lexer.bump();
        self.builder.token(kind, token.span);
        token
    }

    /// Consume a `kind` token or report it missing.
    fn expect(&mut self, kind: SyntaxKind) -> Result<Token, ErrorReported> {
        if self.at(kind) {
            Ok(self.token())
        } else {
            Err(self.missing(TokenSet::single(kind)))
        }
    }

    /// Consume `(`'s partner or report the delimiter unclosed.
    fn expect_close(&mut self, open: Span) -> PResult {
        if self.at(SyntaxKind::RParen) {
            self.token();
            return Ok(());
        }
        let found = self.kind();
        Err(self.report(ParseError::UnclosedDelimiter {
            open,
            at: self.lexer.prev_end(),
            found,
        }))
    }

    /// Scan a foreign span right after the last token and emit it as a
    /// leaf of `kind`. Empty content still yields a (zero-width) leaf.
    fn foreign(&mut self, mode: ScanMode, opener: Span, kind: SyntaxKind) -> Result<Span, ErrorReported> {
        let span = self.lexer.foreign(mode, opener).map_err(|_| ErrorReported)?;
        self.builder.token(kind, span);
        Ok(span)
    }

    /// Whether `span` holds nothing but whitespace.
    fn is_blank(&self, span: Span) -> bool {
        self.lexer.source()[span.to_range()]
            .bytes()
            .all(mly_lexer::is_whitespace)
    }

    // Error reporting.

    /// A required element is absent; anchored at the end of the previous token.
    fn missing(&mut self, expected: TokenSet) -> ErrorReported {
        let found = self.kind();
        self.report(ParseError::MissingElement {
            at: self.lexer.prev_end(),
            expected,
            found,
        })
    }

    /// The lookahead cannot appear here; anchored at the lookahead.
    fn unexpected(&mut self, expected: TokenSet) -> ErrorReported {
        let token = self.lexer.current();
        let error = match token.kind {
            SyntaxKind::Unknown => ParseError::InvalidCharacter {
                span: token.span,
                text: self.lexer.text().into(),
            },
            SyntaxKind::UnknownDirective => ParseError::UnknownDirective {
                span: token.span,
                name: self.lexer.text().into(),
            },
            found => ParseError::UnexpectedToken {
                span: token.span,
                expected,
                found,
            },
        };
        self.report(error)
    }

    /// Record `error` unless lexing already failed (the lexical error then
    /// explains whatever the recognizer tripped over) or a strict parse
    /// already has its error.
    fn report(&mut self, error: ParseError) -> ErrorReported {
        if self.lexer.error().is_none() && (self.recovery || self.errors.is_empty()) {
            debug!(offset = error.offset(), %error, "syntax error");
            self.errors.push(error);
        }
        ErrorReported
    }

    /// Whether parsing must stop after an error.
    fn is_fatal(&self) -> bool {
        !self.recovery || self.lexer.error().is_some()
    }
}

#[cfg(test)]
mod tests;
