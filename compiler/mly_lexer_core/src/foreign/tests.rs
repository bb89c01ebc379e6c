use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

/// Scan `source` in `mode`, starting right after the first `opener_len` bytes.
fn scan(mode: ScanMode, source: &str, opener_len: u32) -> Result<ForeignSpan, ForeignError> {
    let buf = SourceBuffer::new(source);
    OcamlScanner.scan(mode, buf.cursor_at(opener_len))
}

/// Content text of a successful scan.
fn content(mode: ScanMode, source: &str, opener_len: u32) -> String {
    match scan(mode, source, opener_len) {
        Ok(span) => source[span.start as usize..span.content_end as usize].to_owned(),
        Err(err) => panic!("scan of {source:?} failed: {err:?}"),
    }
}

fn offset(source: &str, needle: &str) -> u32 {
    match source.rfind(needle) {
        Some(pos) => u32::try_from(pos).unwrap_or(u32::MAX),
        None => panic!("{needle:?} not in {source:?}"),
    }
}

// === Code blocks ===

#[test]
fn code_block_spans_between_markers() {
    let span = scan(ScanMode::CodeBlock, "%{ let x = 1 %}", 2);
    assert_eq!(
        span,
        Ok(ForeignSpan {
            start: 2,
            content_end: 13,
            end: 15,
        })
    );
}

#[test]
fn code_block_ignores_terminator_in_string() {
    let source = r#"%{ let s = "%}" %}"#;
    assert_eq!(content(ScanMode::CodeBlock, source, 2), r#" let s = "%}" "#);
}

#[test]
fn code_block_ignores_terminator_in_comment() {
    let source = "%{ (* %} *) open M %}";
    assert_eq!(content(ScanMode::CodeBlock, source, 2), " (* %} *) open M ");
}

#[test]
fn code_block_ignores_escaped_quote() {
    let source = r#"%{ let s = "a\"%}" %}"#;
    assert_eq!(content(ScanMode::CodeBlock, source, 2), r#" let s = "a\"%}" "#);
}

#[test]
fn code_block_treats_stray_brace_as_text() {
    let source = "%{ } %}";
    assert_eq!(content(ScanMode::CodeBlock, source, 2), " } ");
}

#[test]
fn code_block_may_span_lines() {
    let source = "%{\nopen Ast\nlet f x =\n  \"multi\nline\"\n%}";
    let span = scan(ScanMode::CodeBlock, source, 2);
    assert_eq!(span.map(|s| s.content_end), Ok(offset(source, "%}")));
}

#[test]
fn unterminated_code_block() {
    assert_eq!(
        scan(ScanMode::CodeBlock, "%{ let x = 1", 2),
        Err(ForeignError {
            mode: ScanMode::CodeBlock,
            start: 2,
            kind: ForeignErrorKind::MissingTerminator,
        })
    );
}

#[test]
fn unterminated_string_inside_code_block() {
    let err = scan(ScanMode::CodeBlock, "%{ let s = \"%} ", 2);
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(ForeignErrorKind::UnterminatedString { at: 11 })
    );
}

#[test]
fn unterminated_comment_inside_code_block() {
    let err = scan(ScanMode::CodeBlock, "%{ (* x %}", 2);
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(ForeignErrorKind::UnterminatedComment { at: 3 })
    );
}

// === Semantic actions ===

#[test]
fn action_balances_nested_braces() {
    let source = "{ { r with a = 1 } }";
    assert_eq!(content(ScanMode::SemanticAction, source, 1), " { r with a = 1 } ");
}

#[test]
fn action_ignores_brace_in_char_literal() {
    let source = "{ f '}' '{' }";
    assert_eq!(content(ScanMode::SemanticAction, source, 1), " f '}' '{' ");
}

#[test]
fn action_handles_char_escapes() {
    let source = r"{ ['\123'; '\x7d'; '\o175'; '\''; '\\'; '\n'] }";
    let span = scan(ScanMode::SemanticAction, source, 1);
    assert_eq!(span.map(|s| s.content_end), Ok(offset(source, "}")));
}

#[test]
fn type_variable_tick_is_not_a_char_literal() {
    let source = "{ (fun (x : 'a) -> x : 'a -> 'a) }";
    let span = scan(ScanMode::SemanticAction, source, 1);
    assert_eq!(span.map(|s| s.content_end), Ok(offset(source, "}")));
}

#[test]
fn identifier_primes_are_not_char_literals() {
    let source = "{ let x' = '}' in x' }";
    assert_eq!(content(ScanMode::SemanticAction, source, 1), " let x' = '}' in x' ");
}

#[test]
fn quoted_strings_hide_braces() {
    let source = "{ {|}|} ^ {id|}|}|id} }";
    assert_eq!(content(ScanMode::SemanticAction, source, 1), " {|}|} ^ {id|}|}|id} ");
}

#[test]
fn brace_without_bar_is_not_a_quoted_string() {
    let source = "{ {x} }";
    assert_eq!(content(ScanMode::SemanticAction, source, 1), " {x} ");
}

#[test]
fn unterminated_quoted_string() {
    let err = scan(ScanMode::SemanticAction, "{ {id|never }", 1);
    assert_eq!(
        err.map_err(|e| e.kind),
        Err(ForeignErrorKind::UnterminatedQuotedString { at: 2 })
    );
}

#[test]
fn action_terminator_is_excluded_from_content() {
    let span = scan(ScanMode::SemanticAction, "{ $1 }rest", 1);
    assert_eq!(
        span,
        Ok(ForeignSpan {
            start: 1,
            content_end: 5,
            end: 6,
        })
    );
}

// === Type annotations ===

#[test]
fn simple_type() {
    assert_eq!(content(ScanMode::TypeAnnotation, "<int list> a", 1), "int list");
}

#[test]
fn arrow_does_not_close_type() {
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<(int -> int) option>", 1),
        "(int -> int) option"
    );
}

#[test]
fn polymorphic_variant_brackets() {
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<[> `A | `B ] t>", 1),
        "[> `A | `B ] t"
    );
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<[< `A ] t>", 1),
        "[< `A ] t"
    );
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<[< `A | `B > `A ] list> x", 1),
        "[< `A | `B > `A ] list"
    );
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<[ `A of int -> int ] t>", 1),
        "[ `A of int -> int ] t"
    );
}

#[test]
fn object_types_nest() {
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<< get : int > list>", 1),
        "< get : int > list"
    );
}

#[test]
fn comment_inside_type() {
    assert_eq!(
        content(ScanMode::TypeAnnotation, "<int (* > *) >", 1),
        "int (* > *) "
    );
}

#[test]
fn unterminated_type() {
    let err = scan(ScanMode::TypeAnnotation, "<int list", 1);
    assert_eq!(
        err.map_err(|e| (e.mode, e.kind)),
        Err((ScanMode::TypeAnnotation, ForeignErrorKind::MissingTerminator))
    );
}

// === Attribute payloads ===

#[test]
fn payload_balances_brackets() {
    assert_eq!(
        content(ScanMode::AttributePayload, "[@foo a [b] [[c]] ]", 5),
        " a [b] [[c]] "
    );
}

#[test]
fn payload_ignores_bracket_in_string_and_char() {
    assert_eq!(
        content(ScanMode::AttributePayload, r#"[@foo "]" ']' ]"#, 5),
        r#" "]" ']' "#
    );
}

#[test]
fn empty_payload() {
    let span = scan(ScanMode::AttributePayload, "[@foo]", 5);
    assert_eq!(span.map(|s| s.content_end - s.start), Ok(0));
}

#[test]
fn unterminated_payload() {
    let err = scan(ScanMode::AttributePayload, "[@foo [x]", 5);
    assert_eq!(err.map_err(|e| e.kind), Err(ForeignErrorKind::MissingTerminator));
}

// === Comments ===

#[test]
fn comment_includes_terminator_in_end() {
    let source = "(* a *)rest";
    assert_eq!(
        scan(ScanMode::Comment, source, 2),
        Ok(ForeignSpan {
            start: 2,
            content_end: 5,
            end: 7,
        })
    );
}

#[test]
fn comments_nest() {
    let source = "(* a (* b *) c *)rest";
    let span = scan(ScanMode::Comment, source, 2);
    assert_eq!(span.map(|s| s.end), Ok(offset(source, "rest")));
}

#[test]
fn comment_ignores_terminator_in_string() {
    let source = r#"(* "*)" *)rest"#;
    let span = scan(ScanMode::Comment, source, 2);
    assert_eq!(span.map(|s| s.end), Ok(offset(source, "rest")));
}

#[test]
fn comment_with_apostrophe_in_word() {
    let source = "(* don't *)rest";
    let span = scan(ScanMode::Comment, source, 2);
    assert_eq!(span.map(|s| s.end), Ok(offset(source, "rest")));
}

#[test]
fn trailing_stars_close_comment() {
    let source = "(* a **)rest";
    let span = scan(ScanMode::Comment, source, 2);
    assert_eq!(span.map(|s| s.end), Ok(offset(source, "rest")));
}

#[test]
fn unclosed_nested_comment_is_missing_terminator() {
    let err = scan(ScanMode::Comment, "(* (* *)", 2);
    assert_eq!(
        err,
        Err(ForeignError {
            mode: ScanMode::Comment,
            start: 2,
            kind: ForeignErrorKind::MissingTerminator,
        })
    );
}

#[test]
fn non_ascii_content_keeps_boundaries() {
    let source = "{ \"\u{3bb}\" \u{3bc} }";
    let span = scan(ScanMode::SemanticAction, source, 1);
    assert_eq!(span.map(|s| s.content_end), Ok(offset(source, "}")));
}

// === Mode metadata ===

#[test]
fn mode_delimiters() {
    assert_eq!(ScanMode::CodeBlock.opener(), "%{");
    assert_eq!(ScanMode::CodeBlock.terminator(), "%}");
    assert_eq!(ScanMode::AttributePayload.terminator(), "]");
    assert_eq!(ScanMode::Comment.name(), "OCaml comment");
}

// === Properties ===

proptest! {
    /// Plain OCaml text without delimiters always ends at the closing brace.
    #[test]
    fn plain_action_ends_at_closing_brace(body in "[a-z0-9 +=*\n.,;_]*") {
        let source = format!("{{{body}}}");
        let span = scan(ScanMode::SemanticAction, &source, 1);
        let expected = u32::try_from(source.len() - 1).unwrap_or(u32::MAX);
        prop_assert_eq!(span.map(|s| s.content_end), Ok(expected));
    }

    /// Wrapping text in a string hides any terminator inside it.
    #[test]
    fn string_hides_terminators(body in "[a-z%}\\]>) ]*") {
        let source = format!("%{{ \"{body}\" %}}");
        let span = scan(ScanMode::CodeBlock, &source, 2);
        let expected = u32::try_from(source.len() - 2).unwrap_or(u32::MAX);
        prop_assert_eq!(span.map(|s| s.content_end), Ok(expected));
    }

    /// The scanner never reads past the end of input.
    #[test]
    fn scan_stays_in_bounds(source in "\\PC{0,40}", mode_index in 0usize..5) {
        let mode = [
            ScanMode::CodeBlock,
            ScanMode::SemanticAction,
            ScanMode::TypeAnnotation,
            ScanMode::AttributePayload,
            ScanMode::Comment,
        ][mode_index];
        let len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        if let Ok(span) = scan(mode, &source, 0) {
            prop_assert!(span.content_end <= span.end);
            prop_assert!(span.end <= len);
        }
    }
}
