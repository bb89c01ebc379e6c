//! Foreign-code scanner for embedded OCaml.
//!
//! Grammar files embed OCaml in five places: header blocks (`%{ ... %}`),
//! semantic actions (`{ ... }`), type annotations (`< ... >`), attribute
//! payloads (`[@id ... ]`) and comments (`(* ... *)`). The host tokenizer
//! cannot find where these end: a `%}` inside an OCaml string, a `}` inside
//! a character literal or a `*)` inside a nested comment all look like
//! terminators. The scanner here knows enough OCaml lexical structure to
//! skip over them.
//!
//! The scanner is stateless between calls. Nesting is tracked with local
//! counters, so deep nesting costs no stack.
//!
//! # Hand-off
//!
//! The caller consumes the opener and passes a cursor positioned right
//! after it. The returned [`ForeignSpan`] marks where the opaque content
//! ends (`content_end`) and where the terminator ends (`end`). The host
//! lexer resumes at `content_end` so the terminator becomes an ordinary
//! host token; the raw scanner, which owns comments outright, resumes at
//! `end`.

use crate::class::{is_ident_start, is_ocaml_ident_continue};
use crate::Cursor;

/// Which construct the scanner is delimiting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// `%{ ... %}` header. Ends at `%}` outside nested braces.
    CodeBlock,
    /// `{ ... }` semantic action. Ends at the `}` matching the opener.
    SemanticAction,
    /// `< ... >` OCaml type. Ends at the `>` matching the opener.
    TypeAnnotation,
    /// `[@id ... ]` payload. Ends at the `]` matching the opener.
    AttributePayload,
    /// `(* ... *)`. Ends at the `*)` matching the opener.
    Comment,
}

impl ScanMode {
    /// Description used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ScanMode::CodeBlock => "OCaml code block",
            ScanMode::SemanticAction => "semantic action",
            ScanMode::TypeAnnotation => "type annotation",
            ScanMode::AttributePayload => "attribute payload",
            ScanMode::Comment => "OCaml comment",
        }
    }

    /// The text that opens the construct.
    pub fn opener(self) -> &'static str {
        match self {
            ScanMode::CodeBlock => "%{",
            ScanMode::SemanticAction => "{",
            ScanMode::TypeAnnotation => "<",
            ScanMode::AttributePayload => "[@",
            ScanMode::Comment => "(*",
        }
    }

    /// The text that closes the construct.
    pub fn terminator(self) -> &'static str {
        match self {
            ScanMode::CodeBlock => "%}",
            ScanMode::SemanticAction => "}",
            ScanMode::TypeAnnotation => ">",
            ScanMode::AttributePayload => "]",
            ScanMode::Comment => "*)",
        }
    }
}

/// Extent of one foreign span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForeignSpan {
    /// First byte after the opener.
    pub start: u32,
    /// One past the last byte of opaque content (the terminator starts here).
    pub content_end: u32,
    /// One past the terminator.
    pub end: u32,
}

/// Why a foreign span could not be delimited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ForeignErrorKind {
    /// End of input before the construct's own terminator.
    MissingTerminator,
    /// A string literal starting at `at` is never closed.
    UnterminatedString { at: u32 },
    /// A nested comment starting at `at` is never closed.
    UnterminatedComment { at: u32 },
    /// A quoted string `{id|` starting at `at` has no `|id}`.
    UnterminatedQuotedString { at: u32 },
}

/// Failure to find the terminator of a foreign span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForeignError {
    pub mode: ScanMode,
    /// Position the scan started from (just after the opener).
    pub start: u32,
    pub kind: ForeignErrorKind,
}

/// Delimits foreign spans. One method, selected by mode.
pub trait ForeignScanner {
    /// Scan from `cursor` (positioned right after the opener) to the
    /// matching terminator.
    fn scan(&self, mode: ScanMode, cursor: Cursor<'_>) -> Result<ForeignSpan, ForeignError>;
}

/// [`ForeignScanner`] for OCaml.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OcamlScanner;

impl ForeignScanner for OcamlScanner {
    fn scan(&self, mode: ScanMode, cursor: Cursor<'_>) -> Result<ForeignSpan, ForeignError> {
        let mut scan = Scan {
            cursor,
            mode,
            start: cursor.pos(),
        };
        match mode {
            ScanMode::CodeBlock | ScanMode::SemanticAction => scan.code(),
            ScanMode::TypeAnnotation => scan.type_expr(),
            ScanMode::AttributePayload => scan.payload(),
            ScanMode::Comment => scan.top_level_comment(),
        }
    }
}

/// State of one scanner invocation.
struct Scan<'a> {
    cursor: Cursor<'a>,
    mode: ScanMode,
    start: u32,
}

impl Scan<'_> {
    fn error(&self, kind: ForeignErrorKind) -> ForeignError {
        ForeignError {
            mode: self.mode,
            start: self.start,
            kind,
        }
    }

    /// Stop in front of a terminator of `len` bytes at the current position.
    fn finish(&self, len: u32) -> ForeignSpan {
        let content_end = self.cursor.pos();
        ForeignSpan {
            start: self.start,
            content_end,
            end: content_end + len,
        }
    }

    fn at_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    // ─── Modes ──────────────────────────────────────────────────────────

    fn code(&mut self) -> Result<ForeignSpan, ForeignError> {
        let mut depth = 0u32;
        loop {
            match self.cursor.current() {
                b'%' if self.cursor.peek() == b'}'
                    && depth == 0
                    && self.mode == ScanMode::CodeBlock =>
                {
                    return Ok(self.finish(2));
                }
                b'}' if depth == 0 => {
                    if self.mode == ScanMode::SemanticAction {
                        return Ok(self.finish(1));
                    }
                    // A stray `}` in a header is just text.
                    self.cursor.advance();
                }
                b'}' => {
                    depth -= 1;
                    self.cursor.advance();
                }
                b'{' => {
                    if !self.quoted_string()? {
                        depth += 1;
                    }
                }
                b'(' if self.cursor.peek() == b'*' => self.comment()?,
                b'"' => self.string()?,
                b'\'' => self.char_or_tick(),
                0 if self.at_eof() => {
                    return Err(self.error(ForeignErrorKind::MissingTerminator));
                }
                b if is_ident_start(b) => self.ident(),
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn type_expr(&mut self) -> Result<ForeignSpan, ForeignError> {
        let mut depth = 0u32;
        // Inside `[ ... ]`, `<` and `>` are polymorphic variant bounds.
        let mut brackets = 0u32;
        loop {
            match self.cursor.current() {
                b'[' => {
                    brackets += 1;
                    self.cursor.advance();
                }
                b']' => {
                    brackets = brackets.saturating_sub(1);
                    self.cursor.advance();
                }
                b'<' | b'>' if brackets > 0 => self.cursor.advance(),
                b'>' if depth == 0 => return Ok(self.finish(1)),
                b'>' => {
                    depth -= 1;
                    self.cursor.advance();
                }
                b'<' => {
                    depth += 1;
                    self.cursor.advance();
                }
                b'-' if self.cursor.peek() == b'>' => self.cursor.advance_n(2),
                b'(' if self.cursor.peek() == b'*' => self.comment()?,
                0 if self.at_eof() => {
                    return Err(self.error(ForeignErrorKind::MissingTerminator));
                }
                b if is_ident_start(b) => self.ident(),
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn payload(&mut self) -> Result<ForeignSpan, ForeignError> {
        let mut depth = 0u32;
        loop {
            match self.cursor.current() {
                b']' if depth == 0 => return Ok(self.finish(1)),
                b']' => {
                    depth -= 1;
                    self.cursor.advance();
                }
                b'[' => {
                    depth += 1;
                    self.cursor.advance();
                }
                b'{' => {
                    self.quoted_string()?;
                }
                b'(' if self.cursor.peek() == b'*' => self.comment()?,
                b'"' => self.string()?,
                b'\'' => self.char_or_tick(),
                0 if self.at_eof() => {
                    return Err(self.error(ForeignErrorKind::MissingTerminator));
                }
                b if is_ident_start(b) => self.ident(),
                _ => self.cursor.advance_char(),
            }
        }
    }

    fn top_level_comment(&mut self) -> Result<ForeignSpan, ForeignError> {
        let opener = self.start.saturating_sub(2);
        match self.comment_body(opener) {
            Ok(()) => {
                let end = self.cursor.pos();
                Ok(ForeignSpan {
                    start: self.start,
                    content_end: end - 2,
                    end,
                })
            }
            Err(err) if err.kind == (ForeignErrorKind::UnterminatedComment { at: opener }) => {
                Err(self.error(ForeignErrorKind::MissingTerminator))
            }
            Err(err) => Err(err),
        }
    }

    // ─── Lexemes ────────────────────────────────────────────────────────

    /// `(* ... *)` with the cursor on `(`.
    fn comment(&mut self) -> Result<(), ForeignError> {
        let at = self.cursor.pos();
        self.cursor.advance_n(2);
        self.comment_body(at)
    }

    /// Comment contents after the opener. Comments nest, and strings,
    /// character literals and quoted strings inside them are honoured.
    fn comment_body(&mut self, at: u32) -> Result<(), ForeignError> {
        let mut depth = 1u32;
        loop {
            match self.cursor.current() {
                b'(' if self.cursor.peek() == b'*' => {
                    depth += 1;
                    self.cursor.advance_n(2);
                }
                b'*' if self.cursor.peek() == b')' => {
                    self.cursor.advance_n(2);
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'"' => self.string()?,
                b'\'' => self.char_or_tick(),
                b'{' => {
                    self.quoted_string()?;
                }
                0 if self.at_eof() => {
                    return Err(self.error(ForeignErrorKind::UnterminatedComment { at }));
                }
                b if is_ident_start(b) => self.ident(),
                _ => self.cursor.advance_char(),
            }
        }
    }

    /// `"..."` with backslash escapes; may span lines.
    fn string(&mut self) -> Result<(), ForeignError> {
        let at = self.cursor.pos();
        self.cursor.advance(); // opening '"'
        loop {
            match self.cursor.skip_to_string_delim() {
                b'"' => {
                    self.cursor.advance();
                    return Ok(());
                }
                b'\\' => {
                    self.cursor.advance();
                    if !self.at_eof() {
                        self.cursor.advance_char();
                    }
                }
                0 if self.at_eof() => {
                    return Err(self.error(ForeignErrorKind::UnterminatedString { at }));
                }
                // Newlines and interior nulls are ordinary string content.
                _ => self.cursor.advance(),
            }
        }
    }

    /// A `'` either opens a character literal or is a type-variable tick.
    ///
    /// Tries the literal forms `'c'`, `'\n'`, `'\123'`, `'\xAB'` and
    /// `'\o177'`; if none matches, only the tick is consumed.
    fn char_or_tick(&mut self) {
        self.cursor.advance(); // '\''
        let after_tick = self.cursor;
        if !self.char_literal_body() {
            self.cursor = after_tick;
        }
    }

    fn char_literal_body(&mut self) -> bool {
        match self.cursor.current() {
            b'\\' => {
                self.cursor.advance();
                match self.cursor.current() {
                    b'0'..=b'9' => {
                        if !self.eat_exactly(3, |b| b.is_ascii_digit()) {
                            return false;
                        }
                    }
                    b'x' => {
                        self.cursor.advance();
                        if !self.eat_exactly(2, |b| b.is_ascii_hexdigit()) {
                            return false;
                        }
                    }
                    b'o' => {
                        self.cursor.advance();
                        if !self.eat_exactly(3, |b| matches!(b, b'0'..=b'7')) {
                            return false;
                        }
                    }
                    b'\'' | b'"' | b'\\' | b'n' | b't' | b'b' | b'r' | b' ' => {
                        self.cursor.advance();
                    }
                    _ => return false,
                }
            }
            b'\'' => return false,
            0 if self.at_eof() => return false,
            _ => self.cursor.advance_char(),
        }
        if self.cursor.current() == b'\'' {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn eat_exactly(&mut self, n: u32, pred: impl Fn(u8) -> bool) -> bool {
        for _ in 0..n {
            if !pred(self.cursor.current()) {
                return false;
            }
            self.cursor.advance();
        }
        true
    }

    /// `{id|...|id}` with the cursor on `{`.
    ///
    /// Returns `Ok(false)` with the cursor just past `{` when the brace does
    /// not open a quoted string.
    fn quoted_string(&mut self) -> Result<bool, ForeignError> {
        let at = self.cursor.pos();
        self.cursor.advance(); // '{'
        let after_brace = self.cursor;
        self.cursor.eat_while(|b| b.is_ascii_lowercase() || b == b'_');
        if self.cursor.current() != b'|' {
            self.cursor = after_brace;
            return Ok(false);
        }
        let id = self.cursor.slice_from(after_brace.pos()).as_bytes();
        self.cursor.advance(); // '|'

        loop {
            self.cursor.eat_until(b'|');
            if self.at_eof() {
                return Err(self.error(ForeignErrorKind::UnterminatedQuotedString { at }));
            }
            self.cursor.advance(); // '|'
            let mut ahead = self.cursor;
            let mut matched = true;
            for &expected in id {
                if ahead.current() != expected {
                    matched = false;
                    break;
                }
                ahead.advance();
            }
            if matched && ahead.current() == b'}' {
                ahead.advance();
                self.cursor = ahead;
                return Ok(true);
            }
        }
    }

    /// Identifiers are consumed whole so that primes in `x'` are not taken
    /// for character literals.
    fn ident(&mut self) {
        self.cursor.advance();
        self.cursor.eat_while(is_ocaml_ident_continue);
    }
}

#[cfg(test)]
mod tests;
