use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn builder_collects_parts() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("unexpected `:`")
        .with_label(Span::new(4, 5), "expected terminal")
        .with_note("declarations list symbols")
        .with_suggestion("remove the `:`");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "unexpected `:`");
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn labels_keep_insertion_order() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_label(Span::new(9, 9), "expected `)`")
        .with_secondary_label(Span::new(0, 1), "opened here");
    assert_eq!(diag.labels[0], Label::primary(Span::new(9, 9), "expected `)`"));
    assert_eq!(diag.labels[1], Label::secondary(Span::new(0, 1), "opened here"));
}

#[test]
fn display_format() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("unterminated block comment")
        .with_label(Span::new(0, 15), "comment starts here")
        .with_secondary_label(Span::new(15, 15), "input ends here")
        .with_note("block comments do not nest")
        .with_suggestion("add `*/`");

    assert_eq!(
        diag.to_string(),
        "error [E0001]: unterminated block comment\n  \
         --> 0..15: comment starts here\n      \
         15..15: input ends here\n  \
         = note: block comments do not nest\n  \
         = help: add `*/`"
    );
}

#[test]
fn structural_equality_and_hash() {
    let d1 = Diagnostic::error(ErrorCode::E1001).with_message("a");
    let d2 = Diagnostic::error(ErrorCode::E1001).with_message("a");
    let d3 = Diagnostic::error(ErrorCode::E1002).with_message("b");

    assert_eq!(d1, d2);
    assert_ne!(d1, d3);

    let set: HashSet<Diagnostic> = [d1, d2, d3].into_iter().collect();
    assert_eq!(set.len(), 2);
}
