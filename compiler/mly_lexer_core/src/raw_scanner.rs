//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with zero heap allocation. It does not resolve
//! directive keywords or identifier case; those are deferred to the cooking
//! layer.
//!
//! # Design
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused method
//! that advances the cursor and returns `RawToken { tag, len }`. The sentinel
//! byte (`0x00`) naturally dispatches to `eof()`.
//!
//! OCaml comments are the one trivia form whose extent depends on OCaml
//! lexical rules; the scanner hands them to its [`ForeignScanner`].
//! Other foreign spans (code blocks, actions, types, payloads) are only
//! recognizable from grammatical context, so the cooking layer requests
//! them explicitly through [`RawScanner::foreign`].

use crate::class::{is_ident_continue, is_ident_start};
use crate::cursor::Cursor;
use crate::foreign::{ForeignError, ForeignScanner, ForeignSpan, OcamlScanner, ScanMode};
use crate::tag::{RawTag, RawToken};

/// UTF-8 encoding of U+FEFF.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Pure, allocation-free scanner.
///
/// Produces one token at a time as a `(tag, length)` pair.
/// Error conditions are encoded as `RawTag` variants, not as `Result::Err`.
///
/// The scanner is `Copy` whenever its foreign scanner is, so a copy is a
/// complete snapshot of scanning state.
#[derive(Clone, Copy, Debug)]
pub struct RawScanner<'a, S = OcamlScanner> {
    cursor: Cursor<'a>,
    foreign: S,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner with the OCaml foreign scanner.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self::with_foreign(cursor, OcamlScanner)
    }
}

impl<'a, S: ForeignScanner> RawScanner<'a, S> {
    /// Create a new scanner with a custom foreign scanner.
    pub fn with_foreign(cursor: Cursor<'a>, foreign: S) -> Self {
        Self { cursor, foreign }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Byte at the current position without scanning a token.
    ///
    /// Used where adjacency matters (`foo.bar` in attribute names).
    #[inline]
    pub fn peek_byte(&self) -> u8 {
        self.cursor.current()
    }

    /// Returns `true` once the source is exhausted.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Delimit a foreign span starting at the current position.
    ///
    /// On success the scanner is left at `content_end`, in front of the
    /// terminator, which the caller then scans as an ordinary token.
    pub fn foreign(&mut self, mode: ScanMode) -> Result<ForeignSpan, ForeignError> {
        let span = self.foreign.scan(mode, self.cursor)?;
        self.cursor.advance_n(span.content_end - self.cursor.pos());
        Ok(span)
    }

    /// Skip everything up to the end of the source.
    ///
    /// Returns the offset scanning resumed from.
    pub fn skip_to_end(&mut self) -> u32 {
        let start = self.cursor.pos();
        self.cursor.advance_n(self.cursor.source_len() - start);
        start
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    #[inline]
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(),
            b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => self.whitespace(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'"' => self.string(start),
            b'%' => self.percent(start),
            b'/' => self.slash(start),
            b'(' => self.left_paren(start),
            b'[' => self.left_bracket(start),
            b';' => self.single(start, RawTag::Semicolon),
            b'<' => self.single(start, RawTag::Less),
            b'>' => self.single(start, RawTag::Greater),
            b')' => self.single(start, RawTag::RightParen),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b']' => self.single(start, RawTag::RightBracket),
            b',' => self.single(start, RawTag::Comma),
            b':' => self.single(start, RawTag::Colon),
            b'|' => self.single(start, RawTag::Pipe),
            b'=' => self.single(start, RawTag::Equal),
            b'.' => self.single(start, RawTag::Dot),
            b'?' => self.single(start, RawTag::Question),
            b'+' => self.single(start, RawTag::Plus),
            b'*' => self.single(start, RawTag::Star),
            0xEF if start == 0 && self.at_bom() => self.bom(start),
            _ => self.invalid_char(start),
        }
    }

    fn token(&self, tag: RawTag, start: u32) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    // ─── EOF ────────────────────────────────────────────────────────────

    fn eof(&mut self) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            let start = self.cursor.pos();
            self.cursor.advance();
            self.token(RawTag::InteriorNull, start)
        }
    }

    // ─── Trivia ─────────────────────────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(RawTag::Whitespace, start)
    }

    fn at_bom(&self) -> bool {
        self.cursor.current() == UTF8_BOM[0]
            && self.cursor.peek() == UTF8_BOM[1]
            && self.cursor.peek2() == UTF8_BOM[2]
    }

    /// A leading byte order mark is skipped like whitespace.
    fn bom(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(3);
        self.token(RawTag::Whitespace, start)
    }

    fn slash(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume first '/'
        match self.cursor.current() {
            b'/' => {
                self.cursor.advance();
                self.cursor.eat_until_newline_or_eof();
                self.token(RawTag::LineComment, start)
            }
            b'*' => {
                self.cursor.advance();
                if self.cursor.eat_past_block_comment_end() {
                    self.token(RawTag::BlockComment, start)
                } else {
                    self.token(RawTag::UnterminatedBlockComment, start)
                }
            }
            _ => self.token(RawTag::InvalidByte, start),
        }
    }

    fn left_paren(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() != b'*' {
            return self.single(start, RawTag::LeftParen);
        }
        self.cursor.advance_n(2); // consume '(*'
        match self.foreign.scan(ScanMode::Comment, self.cursor) {
            Ok(span) => {
                self.cursor.advance_n(span.end - self.cursor.pos());
                self.token(RawTag::OcamlComment, start)
            }
            Err(_) => {
                self.skip_to_end();
                self.token(RawTag::UnterminatedOcamlComment, start)
            }
        }
    }

    // ─── Words ──────────────────────────────────────────────────────────

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // first byte already validated
        self.cursor.eat_while(is_ident_continue);
        self.token(RawTag::Ident, start)
    }

    /// `"..."` on a single line, with backslash escapes.
    fn string(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // opening '"'
        loop {
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance();
                    return self.token(RawTag::String, start);
                }
                b'\\' => {
                    self.cursor.advance();
                    if !self.cursor.is_eof() && !matches!(self.cursor.current(), b'\n' | b'\r') {
                        self.cursor.advance_char();
                    }
                }
                // Newline or EOF.
                _ => return self.token(RawTag::UnterminatedString, start),
            }
        }
    }

    fn percent(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // consume '%'
        match self.cursor.current() {
            b'%' => {
                self.cursor.advance();
                self.token(RawTag::PercentPercent, start)
            }
            b'{' => {
                self.cursor.advance();
                self.token(RawTag::PercentLeftBrace, start)
            }
            b'}' => {
                self.cursor.advance();
                self.token(RawTag::PercentRightBrace, start)
            }
            b if is_ident_start(b) => {
                self.cursor.eat_while(is_ident_continue);
                self.token(RawTag::Directive, start)
            }
            _ => self.token(RawTag::Percent, start),
        }
    }

    // ─── Punctuation ────────────────────────────────────────────────────

    /// Single-byte token: advance one byte and emit the given tag.
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(tag, start)
    }

    fn left_bracket(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b'@' {
            self.cursor.advance_n(2);
            self.token(RawTag::LeftBracketAt, start)
        } else {
            self.single(start, RawTag::InvalidByte)
        }
    }

    // ─── Error tokens ───────────────────────────────────────────────────

    /// Any other character, consumed whole so token boundaries stay on
    /// UTF-8 character boundaries.
    fn invalid_char(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        self.token(RawTag::InvalidByte, start)
    }
}

impl<S: ForeignScanner> Iterator for RawScanner<'_, S> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// Convenience function: tokenize a source string and collect all raw tokens.
///
/// Returns a `Vec<RawToken>` containing all tokens except the final `Eof`.
/// No foreign spans other than comments are recognized, so OCaml code in
/// headers and actions comes out as host tokens.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor()).collect()
}
