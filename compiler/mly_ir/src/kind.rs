//! Syntax kinds shared by the lexer, the recognizer and the tree.
//!
//! One enum covers host tokens, trivia, opaque foreign spans and composite
//! nodes. The tree stores leaves and nodes with the same kind type, which
//! keeps pre-order walks and round-trip reconstruction uniform.

use std::fmt;

/// Kind of a token, trivia piece, leaf or node.
///
/// Discriminants are dense (`0..COUNT`) so that token sets can be a
/// single `u128` bitset.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // === Directives ===
    /// `%%`
    PercentPercent,
    /// `%{`
    HeaderOpen,
    /// `%}`
    HeaderClose,
    /// `%token`
    TokenKw,
    /// `%start`
    StartKw,
    /// `%type`
    TypeKw,
    /// `%left`
    LeftKw,
    /// `%right`
    RightKw,
    /// `%nonassoc`
    NonassocKw,
    /// `%parameter`
    ParameterKw,
    /// `%attribute`
    AttributeKw,
    /// `%on_error_reduce`
    OnErrorReduceKw,
    /// `%prec`
    PrecKw,
    /// `%public`
    PublicKw,
    /// `%inline`
    InlineKw,
    /// Bare `%` (grammar attribute prefix).
    Percent,
    /// `%name` that is not a known directive.
    UnknownDirective,

    // === Punctuation ===
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[@`
    LBracketAt,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `|`
    Pipe,
    /// `=`
    Equals,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `+`
    Plus,
    /// `*`
    Star,

    // === Words & literals ===
    /// `[A-Z][a-zA-Z0-9_]*`
    Uident,
    /// `[a-z_][a-zA-Z0-9_]*`
    Lident,
    /// `"..."` string literal (Menhir token alias).
    String,
    /// Byte sequence that starts no host token.
    Unknown,
    /// End of input.
    Eof,

    // === Trivia ===
    Whitespace,
    /// `;` statement separator.
    Semicolon,
    /// `// ...`
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `(* ... *)`
    OcamlComment,

    // === Named leaves ===
    /// Capitalized symbol reference.
    Terminal,
    /// Lowercase or underscore-initial symbol reference.
    Nonterminal,
    /// Opaque OCaml code (header body or semantic action body).
    Ocaml,
    /// Opaque OCaml type expression.
    OcamlType,
    /// Opaque attribute payload.
    AttributePayload,
    /// Verbatim trailer after the second `%%`.
    Epilogue,
    /// String alias in a `%token` declaration.
    TokenAlias,
    /// Module name in `%parameter`.
    ModuleName,
    /// Module type in `%parameter`.
    ModuleType,
    /// `x` in a `x = actual` producer.
    Binding,

    // === Nodes ===
    GrammarSpecification,
    Header,
    TokenDeclaration,
    StartDeclaration,
    TypeDeclaration,
    PriorityDeclaration,
    ParameterDeclaration,
    GrammarAttribute,
    AttributeDeclaration,
    OnErrorReduceDeclaration,
    Type,
    Actual,
    Attribute,
    AttributeId,
    Rule,
    Formals,
    Alternative,
    Producer,
    Precedence,
    Action,
    /// Input skipped by error recovery.
    Error,
}

impl SyntaxKind {
    /// Number of kinds.
    pub const COUNT: usize = SyntaxKind::Error as usize + 1;

    /// Dense index used by token bitsets.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Trivia are kept beside the tree, never inside it.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Semicolon
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::OcamlComment
        )
    }

    /// Composite kinds own children; every other kind is a leaf.
    #[inline]
    pub const fn is_node(self) -> bool {
        (self as u8) >= (SyntaxKind::GrammarSpecification as u8)
    }

    /// `%`-prefixed directive keywords.
    #[inline]
    pub const fn is_directive(self) -> bool {
        (self as u8) <= (SyntaxKind::UnknownDirective as u8)
    }

    /// Named kinds appear in S-expression output; anonymous punctuation and
    /// keywords do not.
    pub const fn is_named(self) -> bool {
        self.is_node() || ((self as u8) >= (SyntaxKind::Terminal as u8))
    }

    /// Resolve a directive spelling (including the leading `%`).
    pub fn directive(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "%token" => SyntaxKind::TokenKw,
            "%start" => SyntaxKind::StartKw,
            "%type" => SyntaxKind::TypeKw,
            "%left" => SyntaxKind::LeftKw,
            "%right" => SyntaxKind::RightKw,
            "%nonassoc" => SyntaxKind::NonassocKw,
            "%parameter" => SyntaxKind::ParameterKw,
            "%attribute" => SyntaxKind::AttributeKw,
            "%on_error_reduce" => SyntaxKind::OnErrorReduceKw,
            "%prec" => SyntaxKind::PrecKw,
            "%public" => SyntaxKind::PublicKw,
            "%inline" => SyntaxKind::InlineKw,
            _ => return None,
        };
        Some(kind)
    }

    /// Tree-sitter style node name, used by S-expressions and tree dumps.
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Semicolon => "semicolon",
            SyntaxKind::LineComment => "line_comment",
            SyntaxKind::BlockComment => "block_comment",
            SyntaxKind::OcamlComment => "ocaml_comment",
            SyntaxKind::Terminal => "terminal",
            SyntaxKind::Nonterminal => "nonterminal",
            SyntaxKind::Ocaml => "ocaml",
            SyntaxKind::OcamlType => "ocaml_type",
            SyntaxKind::AttributePayload => "attribute_payload",
            SyntaxKind::Epilogue => "epilogue",
            SyntaxKind::TokenAlias => "token_alias",
            SyntaxKind::ModuleName => "module_name",
            SyntaxKind::ModuleType => "module_type",
            SyntaxKind::Binding => "binding",
            SyntaxKind::GrammarSpecification => "grammar_specification",
            SyntaxKind::Header => "header",
            SyntaxKind::TokenDeclaration => "token_declaration",
            SyntaxKind::StartDeclaration => "start_declaration",
            SyntaxKind::TypeDeclaration => "type_declaration",
            SyntaxKind::PriorityDeclaration => "priority_declaration",
            SyntaxKind::ParameterDeclaration => "parameter_declaration",
            SyntaxKind::GrammarAttribute => "grammar_attribute",
            SyntaxKind::AttributeDeclaration => "attribute_declaration",
            SyntaxKind::OnErrorReduceDeclaration => "on_error_reduce_declaration",
            SyntaxKind::Type => "type",
            SyntaxKind::Actual => "actual",
            SyntaxKind::Attribute => "attribute",
            SyntaxKind::AttributeId => "attribute_id",
            SyntaxKind::Rule => "rule",
            SyntaxKind::Formals => "formals",
            SyntaxKind::Alternative => "alternative",
            SyntaxKind::Producer => "producer",
            SyntaxKind::Precedence => "precedence",
            SyntaxKind::Action => "action",
            SyntaxKind::Error => "ERROR",
            other => other.display_name(),
        }
    }

    /// Human-readable name for error messages ("expected `%%`").
    pub fn display_name(self) -> &'static str {
        match self {
            SyntaxKind::PercentPercent => "%%",
            SyntaxKind::HeaderOpen => "%{",
            SyntaxKind::HeaderClose => "%}",
            SyntaxKind::TokenKw => "%token",
            SyntaxKind::StartKw => "%start",
            SyntaxKind::TypeKw => "%type",
            SyntaxKind::LeftKw => "%left",
            SyntaxKind::RightKw => "%right",
            SyntaxKind::NonassocKw => "%nonassoc",
            SyntaxKind::ParameterKw => "%parameter",
            SyntaxKind::AttributeKw => "%attribute",
            SyntaxKind::OnErrorReduceKw => "%on_error_reduce",
            SyntaxKind::PrecKw => "%prec",
            SyntaxKind::PublicKw => "%public",
            SyntaxKind::InlineKw => "%inline",
            SyntaxKind::Percent => "%",
            SyntaxKind::UnknownDirective => "unknown directive",
            SyntaxKind::Lt => "<",
            SyntaxKind::Gt => ">",
            SyntaxKind::LParen => "(",
            SyntaxKind::RParen => ")",
            SyntaxKind::LBrace => "{",
            SyntaxKind::RBrace => "}",
            SyntaxKind::LBracketAt => "[@",
            SyntaxKind::RBracket => "]",
            SyntaxKind::Comma => ",",
            SyntaxKind::Colon => ":",
            SyntaxKind::Pipe => "|",
            SyntaxKind::Equals => "=",
            SyntaxKind::Dot => ".",
            SyntaxKind::Question => "?",
            SyntaxKind::Plus => "+",
            SyntaxKind::Star => "*",
            SyntaxKind::Uident | SyntaxKind::Terminal => "terminal",
            SyntaxKind::Lident | SyntaxKind::Nonterminal => "nonterminal",
            SyntaxKind::String | SyntaxKind::TokenAlias => "string literal",
            SyntaxKind::Unknown => "unknown character",
            SyntaxKind::Eof => "end of input",
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::LineComment => "line comment",
            SyntaxKind::BlockComment => "block comment",
            SyntaxKind::OcamlComment => "OCaml comment",
            SyntaxKind::Ocaml => "OCaml code",
            SyntaxKind::OcamlType => "OCaml type",
            SyntaxKind::AttributePayload => "attribute payload",
            SyntaxKind::Epilogue => "epilogue",
            SyntaxKind::ModuleName => "module name",
            SyntaxKind::ModuleType => "module type",
            SyntaxKind::Binding => "binding",
            SyntaxKind::GrammarSpecification => "grammar specification",
            SyntaxKind::Header => "header",
            SyntaxKind::TokenDeclaration => "token declaration",
            SyntaxKind::StartDeclaration => "start declaration",
            SyntaxKind::TypeDeclaration => "type declaration",
            SyntaxKind::PriorityDeclaration => "priority declaration",
            SyntaxKind::ParameterDeclaration => "parameter declaration",
            SyntaxKind::GrammarAttribute => "grammar attribute",
            SyntaxKind::AttributeDeclaration => "attribute declaration",
            SyntaxKind::OnErrorReduceDeclaration => "on_error_reduce declaration",
            SyntaxKind::Type => "type annotation",
            SyntaxKind::Actual => "actual",
            SyntaxKind::Attribute => "attribute",
            SyntaxKind::AttributeId => "attribute identifier",
            SyntaxKind::Rule => "rule",
            SyntaxKind::Formals => "formal parameters",
            SyntaxKind::Alternative => "alternative",
            SyntaxKind::Producer => "producer",
            SyntaxKind::Precedence => "precedence",
            SyntaxKind::Action => "semantic action",
            SyntaxKind::Error => "error",
        }
    }
}

impl fmt::Debug for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

const _: () = assert!(SyntaxKind::COUNT <= 128, "token sets are u128 bitsets");

#[cfg(test)]
mod tests;
