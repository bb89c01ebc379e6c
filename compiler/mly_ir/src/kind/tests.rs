use super::*;

#[test]
fn kind_is_one_byte() {
    assert_eq!(std::mem::size_of::<SyntaxKind>(), 1);
}

#[test]
fn directive_spellings_round_trip() {
    for kind in [
        SyntaxKind::TokenKw,
        SyntaxKind::StartKw,
        SyntaxKind::TypeKw,
        SyntaxKind::LeftKw,
        SyntaxKind::RightKw,
        SyntaxKind::NonassocKw,
        SyntaxKind::ParameterKw,
        SyntaxKind::AttributeKw,
        SyntaxKind::OnErrorReduceKw,
        SyntaxKind::PrecKw,
        SyntaxKind::PublicKw,
        SyntaxKind::InlineKw,
    ] {
        assert_eq!(SyntaxKind::directive(kind.display_name()), Some(kind));
        assert!(kind.is_directive());
    }
}

#[test]
fn unknown_directive_is_not_resolved() {
    assert_eq!(SyntaxKind::directive("%tokens"), None);
    assert_eq!(SyntaxKind::directive("%"), None);
    assert_eq!(SyntaxKind::directive("token"), None);
}

#[test]
fn trivia_classification() {
    assert!(SyntaxKind::Whitespace.is_trivia());
    assert!(SyntaxKind::Semicolon.is_trivia());
    assert!(SyntaxKind::OcamlComment.is_trivia());
    assert!(!SyntaxKind::Comma.is_trivia());
    assert!(!SyntaxKind::Terminal.is_trivia());
}

#[test]
fn named_and_anonymous_kinds() {
    assert!(SyntaxKind::Terminal.is_named());
    assert!(SyntaxKind::Ocaml.is_named());
    assert!(SyntaxKind::Rule.is_named());
    assert!(!SyntaxKind::Comma.is_named());
    assert!(!SyntaxKind::TokenKw.is_named());
    assert!(!SyntaxKind::Whitespace.is_named());
}

#[test]
fn nodes_are_exactly_the_composite_kinds() {
    assert!(SyntaxKind::GrammarSpecification.is_node());
    assert!(SyntaxKind::Error.is_node());
    assert!(!SyntaxKind::Terminal.is_node());
    assert!(!SyntaxKind::Binding.is_node());
}

#[test]
fn names_match_tree_sitter_style() {
    assert_eq!(SyntaxKind::OnErrorReduceDeclaration.name(), "on_error_reduce_declaration");
    assert_eq!(SyntaxKind::PercentPercent.name(), "%%");
    assert_eq!(format!("{:?}", SyntaxKind::Actual), "actual");
    assert_eq!(SyntaxKind::Uident.to_string(), "terminal");
}
