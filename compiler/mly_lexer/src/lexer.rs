//! Pull lexer with lazy one-token lookahead.
//!
//! The lexer owns no source copy: it borrows the sentinel buffer and the
//! original `&str`. Tokens are cooked on demand. Trivia met on the way are
//! collected in order and handed to the tree builder at the end.
//!
//! # Foreign hand-off
//!
//! After the recognizer bumps a trigger token it calls [`Lexer::foreign`].
//! If the lookahead was already filled, the lexer rewinds to the end of the
//! trigger first, so the foreign span always starts right after it.

use mly_ir::{Span, SyntaxKind, Token, Trivia};
use mly_lexer_core::{RawScanner, ScanMode, SourceBuffer};
use tracing::trace;

use crate::cooker::{cook, Cooked, Unterminated};
use crate::LexError;

/// Pull lexer over one source.
pub struct Lexer<'a> {
    source: &'a str,
    scanner: RawScanner<'a>,
    /// Lookahead token, lexed lazily.
    current: Option<Token>,
    /// Scanner state at `prev_end`, before the lookahead and its trivia.
    before_current: RawScanner<'a>,
    trivia: Vec<Trivia>,
    /// Trivia count at `prev_end`.
    trivia_before_current: usize,
    /// End of the last consumed token.
    prev_end: u32,
    error: Option<LexError>,
}

/// Saved lexer position for bounded lookahead.
#[derive(Clone, Copy, Debug)]
pub struct LexerSnapshot<'a> {
    scanner: RawScanner<'a>,
    current: Option<Token>,
    before_current: RawScanner<'a>,
    trivia_len: usize,
    trivia_before_current: usize,
    prev_end: u32,
    error: Option<LexError>,
}

impl<'a> Lexer<'a> {
    /// `buffer` must have been built from `source`.
    pub fn new(buffer: &'a SourceBuffer, source: &'a str) -> Self {
        debug_assert_eq!(buffer.as_bytes(), source.as_bytes());
        let scanner = RawScanner::new(buffer.cursor());
        Lexer {
            source,
            scanner,
            current: None,
            before_current: scanner,
            trivia: Vec::new(),
            trivia_before_current: 0,
            prev_end: 0,
            error: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The lookahead token.
    pub fn current(&mut self) -> Token {
        match self.current {
            Some(token) => token,
            None => {
                let token = self.lex_token();
                self.current = Some(token);
                token
            }
        }
    }

    /// Kind of the lookahead token.
    #[inline]
    pub fn kind(&mut self) -> SyntaxKind {
        self.current().kind
    }

    #[inline]
    pub fn at(&mut self, kind: SyntaxKind) -> bool {
        self.kind() == kind
    }

    /// Source text of the lookahead token.
    pub fn text(&mut self) -> &'a str {
        let span = self.current().span;
        &self.source[span.to_range()]
    }

    /// Consume the lookahead token.
    pub fn bump(&mut self) -> Token {
        let token = self.current();
        self.current = None;
        if token.kind != SyntaxKind::Eof {
            self.prev_end = token.span.end;
            self.before_current = self.scanner;
            self.trivia_before_current = self.trivia.len();
        }
        token
    }

    /// End offset of the last consumed token.
    pub fn prev_end(&self) -> u32 {
        self.prev_end
    }

    /// The byte right after the last consumed token, without lexing.
    pub fn peek_byte(&self) -> u8 {
        self.before_current.peek_byte()
    }

    /// Delimit a foreign span right after the last consumed token.
    ///
    /// `opener` is the trigger token (or, for payloads, the attribute
    /// start); it anchors the error. On success returns the opaque content
    /// and leaves the terminator as the next host token.
    pub fn foreign(&mut self, mode: ScanMode, opener: Span) -> Result<Span, LexError> {
        self.rewind();
        if let Some(err) = self.error {
            return Err(err);
        }
        trace!(mode = mode.name(), at = self.prev_end, "foreign hand-off");
        match self.scanner.foreign(mode) {
            Ok(span) => {
                let content = Span::new(span.start, span.content_end);
                self.commit(content.end);
                Ok(content)
            }
            Err(err) => {
                let lex_error = LexError::UnterminatedForeign {
                    mode,
                    span: Span::new(opener.start, self.source_len()),
                    cause: err.kind,
                };
                trace!(mode = mode.name(), start = opener.start, "unterminated foreign span");
                self.fail(lex_error);
                Err(lex_error)
            }
        }
    }

    /// Consume everything after the last consumed token.
    pub fn rest(&mut self) -> Span {
        self.rewind();
        let start = self.scanner.skip_to_end();
        let span = Span::new(start, self.source_len());
        self.commit(span.end);
        span
    }

    pub fn snapshot(&self) -> LexerSnapshot<'a> {
        LexerSnapshot {
            scanner: self.scanner,
            current: self.current,
            before_current: self.before_current,
            trivia_len: self.trivia.len(),
            trivia_before_current: self.trivia_before_current,
            prev_end: self.prev_end,
            error: self.error,
        }
    }

    pub fn restore(&mut self, snapshot: LexerSnapshot<'a>) {
        self.scanner = snapshot.scanner;
        self.current = snapshot.current;
        self.before_current = snapshot.before_current;
        self.trivia.truncate(snapshot.trivia_len);
        self.trivia_before_current = snapshot.trivia_before_current;
        self.prev_end = snapshot.prev_end;
        self.error = snapshot.error;
    }

    /// The first lexical error, if any. Lexing stops there.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Record `error` and stop lexing.
    pub fn fail(&mut self, error: LexError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.current = None;
    }

    /// Trivia collected so far, in source order.
    pub fn trivia(&self) -> &[Trivia] {
        &self.trivia
    }

    /// Finish lexing and return the collected trivia.
    pub fn into_trivia(self) -> Vec<Trivia> {
        self.trivia
    }

    /// Drop the lookahead and any trivia lexed with it.
    fn rewind(&mut self) {
        if self.current.take().is_some() {
            self.scanner = self.before_current;
            self.trivia.truncate(self.trivia_before_current);
            // An error met while lexing the lookahead no longer applies.
            if self.error.is_some_and(|err| err.offset() >= self.prev_end) {
                self.error = None;
            }
        }
    }

    /// Mark everything up to `end` as consumed.
    fn commit(&mut self, end: u32) {
        self.prev_end = end;
        self.before_current = self.scanner;
        self.trivia_before_current = self.trivia.len();
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "the recognizer rejects sources beyond u32 offsets before lexing"
    )]
    fn source_len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Lex the next significant token, collecting trivia on the way.
    fn lex_token(&mut self) -> Token {
        if let Some(err) = self.error {
            return Token::new(SyntaxKind::Eof, Span::point(err.offset()));
        }
        loop {
            let start = self.scanner.pos();
            let raw = self.scanner.next_token();
            let span = Span::new(start, start + raw.len);
            match cook(raw.tag, &self.source[span.to_range()]) {
                Cooked::Token(kind) => return Token::new(kind, span),
                Cooked::Trivia(kind) => self.trivia.push(Trivia { kind, span }),
                Cooked::Error(what) => {
                    let error = match what {
                        Unterminated::BlockComment => LexError::UnterminatedBlockComment { span },
                        Unterminated::OcamlComment => LexError::UnterminatedOcamlComment { span },
                        Unterminated::String => LexError::UnterminatedString { span },
                    };
                    trace!(?error, "lex error");
                    self.error = Some(error);
                    return Token::new(SyntaxKind::Eof, Span::point(start));
                }
            }
        }
    }
}
