use mly_diagnostic::ErrorCode;
use mly_ir::{Span, SyntaxKind};
use mly_lexer::LexError;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn unexpected_token_message() {
    let err = ParseError::UnexpectedToken {
        span: Span::new(3, 4),
        expected: TokenSet::single(SyntaxKind::Colon).with(SyntaxKind::LParen),
        found: SyntaxKind::RBrace,
    };
    assert_eq!(err.to_string(), "expected `(` or `:`, found `}`");
    assert_eq!(err.offset(), 3);
    assert_eq!(err.span(), Span::new(3, 4));
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn missing_element_is_a_point() {
    let err = ParseError::MissingElement {
        at: 6,
        expected: TokenSet::single(SyntaxKind::Uident),
        found: SyntaxKind::Eof,
    };
    assert_eq!(err.span(), Span::point(6));
    assert_eq!(err.to_string(), "expected terminal after this, found end of input");
    let diag = err.to_diagnostic();
    assert_eq!(diag.labels[0].span, Span::point(6));
    assert_eq!(diag.labels[0].message, "expected terminal");
}

#[test]
fn unclosed_delimiter_points_back_at_the_opener() {
    let err = ParseError::UnclosedDelimiter {
        open: Span::new(10, 11),
        at: 20,
        found: SyntaxKind::PercentPercent,
    };
    assert_eq!(err.to_string(), "unclosed `(`: expected `)`, found `%%`");
    assert_eq!(err.expected(), TokenSet::single(SyntaxKind::RParen));
    let diag = err.to_diagnostic();
    assert_eq!(diag.labels[0].span, Span::point(20));
    assert!(diag.labels.iter().any(|l| !l.is_primary && l.span == Span::new(10, 11)));
}

#[test]
fn unknown_directive_lists_the_keywords() {
    let err = ParseError::UnknownDirective {
        span: Span::new(0, 4),
        name: "%foo".into(),
    };
    assert_eq!(err.to_string(), "unknown directive `%foo`");
    let diag = err.to_diagnostic();
    assert!(diag.notes[0].contains("`%token`"));
    assert!(diag.notes[0].contains("`%on_error_reduce`"));
}

#[test]
fn invalid_character_message() {
    let err = ParseError::InvalidCharacter {
        span: Span::new(2, 4),
        text: "é".into(),
    };
    assert_eq!(err.to_string(), "invalid character \"é\"");
    assert_eq!(err.code(), ErrorCode::E0005);
}

#[test]
fn syntax_error_delegates() {
    let lex = SyntaxError::from(LexError::UnterminatedString {
        span: Span::new(4, 9),
    });
    assert!(lex.is_lexical());
    assert_eq!(lex.offset(), 4);
    assert_eq!(lex.code(), ErrorCode::E0003);
    assert_eq!(lex.to_string(), "unterminated string literal");

    let parse = SyntaxError::from(ParseError::MissingSeparator { at: 12 });
    assert!(!parse.is_lexical());
    assert_eq!(parse.span(), Span::point(12));
    assert_eq!(parse.code(), ErrorCode::E1004);
    assert_eq!(
        parse.to_diagnostic().message,
        "missing `%%` between the declarations and the rules"
    );
}
