//! Raw token tags produced by the [`RawScanner`](crate::RawScanner).
//!
//! Tags carry no text and no resolved meaning: `%token` is a `Directive`,
//! `FOO` and `foo` are both `Ident`. The cooking layer (`mly_lexer`)
//! resolves directive keywords and identifier case.

/// Kind of a raw token.
///
/// Discriminants are grouped in semantic ranges:
/// - Words: 0-15
/// - Directives: 16-31
/// - Punctuation: 32-63
/// - Trivia: 112-127
/// - Errors: 240-254
/// - Control: 255
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Words ===
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Ident = 0,
    /// `"..."` on one line.
    String = 1,
    /// `%` immediately followed by identifier characters.
    Directive = 2,

    // === Directives ===
    /// `%%`
    PercentPercent = 16,
    /// `%{`
    PercentLeftBrace = 17,
    /// `%}`
    PercentRightBrace = 18,
    /// `%` not followed by `%`, `{`, `}` or a word.
    Percent = 19,

    // === Punctuation ===
    Less = 32,
    Greater = 33,
    LeftParen = 34,
    RightParen = 35,
    LeftBrace = 36,
    RightBrace = 37,
    /// `[@`
    LeftBracketAt = 38,
    RightBracket = 39,
    Comma = 40,
    Colon = 41,
    Pipe = 42,
    Equal = 43,
    Dot = 44,
    Question = 45,
    Plus = 46,
    Star = 47,

    // === Trivia ===
    /// Run of spaces, tabs, newlines, vertical tabs and form feeds.
    Whitespace = 112,
    /// `;` separates rules and declarations but carries no structure.
    Semicolon = 113,
    /// `// ...` up to (not including) the newline.
    LineComment = 114,
    /// `/* ... */`, non-nesting.
    BlockComment = 115,
    /// `(* ... *)`, nesting, scanned by the foreign scanner.
    OcamlComment = 116,

    // === Errors ===
    /// A character that starts no host token.
    InvalidByte = 240,
    /// U+0000 inside the source.
    InteriorNull = 241,
    /// `"` without a closing quote on the same line.
    UnterminatedString = 242,
    /// `/*` without `*/`.
    UnterminatedBlockComment = 243,
    /// `(*` without its matching `*)`.
    UnterminatedOcamlComment = 244,

    // === Control ===
    Eof = 255,
}

impl RawTag {
    /// Fixed source text for tags that always spell the same way.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            RawTag::PercentPercent => "%%",
            RawTag::PercentLeftBrace => "%{",
            RawTag::PercentRightBrace => "%}",
            RawTag::Percent => "%",
            RawTag::Less => "<",
            RawTag::Greater => ">",
            RawTag::LeftParen => "(",
            RawTag::RightParen => ")",
            RawTag::LeftBrace => "{",
            RawTag::RightBrace => "}",
            RawTag::LeftBracketAt => "[@",
            RawTag::RightBracket => "]",
            RawTag::Comma => ",",
            RawTag::Colon => ":",
            RawTag::Pipe => "|",
            RawTag::Equal => "=",
            RawTag::Dot => ".",
            RawTag::Question => "?",
            RawTag::Plus => "+",
            RawTag::Star => "*",
            RawTag::Semicolon => ";",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description.
    pub fn name(self) -> &'static str {
        match self {
            RawTag::Ident => "identifier",
            RawTag::String => "string literal",
            RawTag::Directive => "directive",
            RawTag::PercentPercent => "`%%`",
            RawTag::PercentLeftBrace => "`%{`",
            RawTag::PercentRightBrace => "`%}`",
            RawTag::Percent => "`%`",
            RawTag::Less => "`<`",
            RawTag::Greater => "`>`",
            RawTag::LeftParen => "`(`",
            RawTag::RightParen => "`)`",
            RawTag::LeftBrace => "`{`",
            RawTag::RightBrace => "`}`",
            RawTag::LeftBracketAt => "`[@`",
            RawTag::RightBracket => "`]`",
            RawTag::Comma => "`,`",
            RawTag::Colon => "`:`",
            RawTag::Pipe => "`|`",
            RawTag::Equal => "`=`",
            RawTag::Dot => "`.`",
            RawTag::Question => "`?`",
            RawTag::Plus => "`+`",
            RawTag::Star => "`*`",
            RawTag::Whitespace => "whitespace",
            RawTag::Semicolon => "`;`",
            RawTag::LineComment => "line comment",
            RawTag::BlockComment => "block comment",
            RawTag::OcamlComment => "OCaml comment",
            RawTag::InvalidByte => "invalid byte",
            RawTag::InteriorNull => "interior null byte",
            RawTag::UnterminatedString => "unterminated string",
            RawTag::UnterminatedBlockComment => "unterminated block comment",
            RawTag::UnterminatedOcamlComment => "unterminated OCaml comment",
            RawTag::Eof => "end of file",
        }
    }

    /// Skippable between any two host tokens.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace
                | RawTag::Semicolon
                | RawTag::LineComment
                | RawTag::BlockComment
                | RawTag::OcamlComment
        )
    }

    /// Malformed input the cooking layer must report.
    #[inline]
    pub fn is_error(self) -> bool {
        (self as u8) >= 240 && self != RawTag::Eof
    }
}

/// A raw token: tag plus byte length. Position is implicit (running sum).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

const _: () = assert!(std::mem::size_of::<RawToken>() == 8);
