//! Raw tag to syntax kind translation.
//!
//! Each `RawTag` category has a dedicated path:
//! - **Punctuation**: direct 1:1 mapping
//! - **Identifiers**: case decides terminal vs nonterminal
//! - **Directives**: keyword lookup, `UnknownDirective` otherwise
//! - **Trivia**: mapped to trivia kinds, kept beside the tree
//! - **Errors**: unterminated constructs become lex errors; stray bytes
//!   become `Unknown` tokens for the recognizer to report

use mly_ir::SyntaxKind;
use mly_lexer_core::{ident_case, IdentCase, RawTag};

/// What a raw token turned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Cooked {
    Token(SyntaxKind),
    Trivia(SyntaxKind),
    /// An unterminated construct; always fatal.
    Error(Unterminated),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Unterminated {
    BlockComment,
    OcamlComment,
    String,
}

/// Cook a single raw token. `text` is the token's source text.
pub(crate) fn cook(tag: RawTag, text: &str) -> Cooked {
    let kind = match tag {
        RawTag::Ident => match ident_case(text) {
            Some(IdentCase::Capitalized) => SyntaxKind::Uident,
            _ => SyntaxKind::Lident,
        },
        RawTag::String => SyntaxKind::String,
        RawTag::Directive => SyntaxKind::directive(text).unwrap_or(SyntaxKind::UnknownDirective),

        RawTag::PercentPercent => SyntaxKind::PercentPercent,
        RawTag::PercentLeftBrace => SyntaxKind::HeaderOpen,
        RawTag::PercentRightBrace => SyntaxKind::HeaderClose,
        RawTag::Percent => SyntaxKind::Percent,

        RawTag::Less => SyntaxKind::Lt,
        RawTag::Greater => SyntaxKind::Gt,
        RawTag::LeftParen => SyntaxKind::LParen,
        RawTag::RightParen => SyntaxKind::RParen,
        RawTag::LeftBrace => SyntaxKind::LBrace,
        RawTag::RightBrace => SyntaxKind::RBrace,
        RawTag::LeftBracketAt => SyntaxKind::LBracketAt,
        RawTag::RightBracket => SyntaxKind::RBracket,
        RawTag::Comma => SyntaxKind::Comma,
        RawTag::Colon => SyntaxKind::Colon,
        RawTag::Pipe => SyntaxKind::Pipe,
        RawTag::Equal => SyntaxKind::Equals,
        RawTag::Dot => SyntaxKind::Dot,
        RawTag::Question => SyntaxKind::Question,
        RawTag::Plus => SyntaxKind::Plus,
        RawTag::Star => SyntaxKind::Star,

        RawTag::Whitespace => return Cooked::Trivia(SyntaxKind::Whitespace),
        RawTag::Semicolon => return Cooked::Trivia(SyntaxKind::Semicolon),
        RawTag::LineComment => return Cooked::Trivia(SyntaxKind::LineComment),
        RawTag::BlockComment => return Cooked::Trivia(SyntaxKind::BlockComment),
        RawTag::OcamlComment => return Cooked::Trivia(SyntaxKind::OcamlComment),

        RawTag::InvalidByte | RawTag::InteriorNull => SyntaxKind::Unknown,
        RawTag::UnterminatedString => return Cooked::Error(Unterminated::String),
        RawTag::UnterminatedBlockComment => return Cooked::Error(Unterminated::BlockComment),
        RawTag::UnterminatedOcamlComment => return Cooked::Error(Unterminated::OcamlComment),

        RawTag::Eof => SyntaxKind::Eof,
    };
    Cooked::Token(kind)
}
