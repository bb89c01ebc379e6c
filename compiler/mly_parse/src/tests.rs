#![allow(clippy::unwrap_used, clippy::expect_used)]

use mly_diagnostic::ErrorCode;
use mly_ir::{Span, SyntaxKind};
use mly_lexer::{LexError, ScanMode};
use pretty_assertions::assert_eq;

use crate::recovery::TokenSet;
use crate::{parse, parse_with_options, ParseError, ParseOptions, SyntaxError};

fn parse_error(source: &str) -> ParseError {
    match parse(source) {
        Err(SyntaxError::Parse(err)) => err,
        other => panic!("expected a parse error for {source:?}, got {other:?}"),
    }
}

fn lex_error(source: &str) -> LexError {
    match parse(source) {
        Err(SyntaxError::Lex(err)) => err,
        other => panic!("expected a lex error for {source:?}, got {other:?}"),
    }
}

#[test]
fn missing_terminal_is_anchored_after_the_keyword() {
    let err = parse_error("%token %% %%");
    assert_eq!(
        err,
        ParseError::MissingElement {
            at: 6,
            expected: TokenSet::single(SyntaxKind::Uident),
            found: SyntaxKind::PercentPercent,
        }
    );
    assert_eq!(err.offset(), 6);
    assert_eq!(err.to_string(), "expected terminal after this, found `%%`");
}

#[test]
fn unterminated_block_comment_reports_its_start() {
    let err = lex_error("/* never closed");
    assert_eq!(err, LexError::UnterminatedBlockComment { span: Span::new(0, 15) });
    assert_eq!(err.offset(), 0);
}

#[test]
fn lexical_error_wins_over_the_parse_error_it_causes() {
    // The comment swallows the terminal `%token` needs.
    let err = parse("%token /* x").unwrap_err();
    assert!(err.is_lexical());
    assert_eq!(err.offset(), 7);
}

#[test]
fn unterminated_header() {
    let err = lex_error("%{ let x = 1");
    match err {
        LexError::UnterminatedForeign { mode, span, .. } => {
            assert_eq!(mode, ScanMode::CodeBlock);
            assert_eq!(span.start, 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unterminated_action_reports_the_brace() {
    let source = "%token A\n%%\na: { x\n";
    let err = lex_error(source);
    assert_eq!(err.offset(), 15);
    assert!(matches!(
        err,
        LexError::UnterminatedForeign {
            mode: ScanMode::SemanticAction,
            ..
        }
    ));
}

#[test]
fn missing_separator() {
    let err = parse_error("%token FOO\n");
    assert_eq!(err, ParseError::MissingSeparator { at: 10 });
    assert_eq!(err.code(), ErrorCode::E1004);
}

#[test]
fn empty_input_lacks_the_separator() {
    assert_eq!(parse_error(""), ParseError::MissingSeparator { at: 0 });
}

#[test]
fn unknown_directive() {
    let err = parse_error("%tokens A\n%%");
    assert_eq!(
        err,
        ParseError::UnknownDirective {
            span: Span::new(0, 7),
            name: "%tokens".into(),
        }
    );
    assert_eq!(err.code(), ErrorCode::E1005);
}

#[test]
fn rules_directive_in_declarations() {
    let err = parse_error("%prec A\n%%");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            found: SyntaxKind::PrecKw,
            ..
        }
    ));
    assert_eq!(err.offset(), 0);
}

#[test]
fn unclosed_parenthesis() {
    let err = parse_error("%type <t> list(a b\n%%");
    assert_eq!(
        err,
        ParseError::UnclosedDelimiter {
            open: Span::new(14, 15),
            at: 18,
            found: SyntaxKind::PercentPercent,
        }
    );
    assert_eq!(err.code(), ErrorCode::E1003);
}

#[test]
fn stray_token_after_alternative() {
    let err = parse_error("%%\na: B }");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            span,
            found: SyntaxKind::RBrace,
            ..
        } if span == Span::new(8, 9)
    ));
}

#[test]
fn invalid_character() {
    let err = parse_error("%token FOO\n$\n%%");
    assert_eq!(
        err,
        ParseError::InvalidCharacter {
            span: Span::new(11, 12),
            text: "$".into(),
        }
    );
    assert_eq!(err.code(), ErrorCode::E0005);
}

#[test]
fn rule_name_must_be_lowercase() {
    let err = parse_error("%%\nFoo: A\n");
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            found: SyntaxKind::Uident,
            ..
        }
    ));
}

#[test]
fn missing_colon_after_rule_name() {
    let err = parse_error("%%\na B\n");
    assert!(matches!(err, ParseError::MissingElement { at: 4, .. }));
}

#[test]
fn type_declaration_needs_a_type() {
    let err = parse_error("%type expr\n%%");
    assert_eq!(
        err,
        ParseError::MissingElement {
            at: 5,
            expected: TokenSet::single(SyntaxKind::Lt),
            found: SyntaxKind::Lident,
        }
    );
}

#[test]
fn trailing_comma_needs_an_item() {
    let err = parse_error("%left A,\n%%");
    assert!(matches!(err, ParseError::MissingElement { at: 8, .. }));
}

#[test]
fn strict_parse_stops_at_first_error() {
    let output = parse_with_options("%token\n%start\n%%", ParseOptions::strict());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].offset(), 6);
}

#[test]
fn recovery_collects_every_error() {
    let output = parse_with_options("%token\n%start\n%%", ParseOptions::default());
    let offsets: Vec<u32> = output.errors.iter().map(SyntaxError::offset).collect();
    assert_eq!(offsets, [6, 13]);
    assert!(output.is_partial());
}

#[test]
fn source_over_budget() {
    let output = parse_with_options("%%\n", ParseOptions::default().with_max_source_len(2));
    assert_eq!(
        output.errors,
        [SyntaxError::Lex(LexError::SourceTooLarge { len: 3, max: 2 })]
    );
    assert_eq!(output.tree.to_sexp(), "(grammar_specification)");
}

#[test]
fn clean_parse_is_not_partial() {
    let output = parse_with_options("%%", ParseOptions::default());
    assert!(!output.has_errors());
    assert!(!output.is_partial());
    assert!(output.into_result().is_ok());
}

#[test]
fn diagnostics_carry_codes_and_labels() {
    let err = parse("%token %% %%").unwrap_err();
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1002);
    assert_eq!(diag.labels[0].span, Span::point(6));

    let err = parse("/* x").unwrap_err();
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0001);
}

#[test]
fn expected_sets_read_naturally() {
    let set = TokenSet::new()
        .with(SyntaxKind::PercentPercent)
        .with(SyntaxKind::Uident)
        .with(SyntaxKind::Colon);
    assert_eq!(set.to_string(), "`%%`, `:` or terminal");
}
