//! Error recovery for the recognizer.
//!
//! Provides token sets and synchronization for continuing after errors.
//! Uses bitset-based O(1) membership testing inspired by Go's parser.
//!
//! Recovery is phase-aware: in the declarations phase the recognizer skips
//! to the next declaration keyword or `%%`; in the rules phase it skips to
//! the next rule head or `%%`. Skipped tokens are kept in the tree under an
//! `Error` node so that leaves and trivia still cover the source.

use std::fmt;

use mly_ir::SyntaxKind;
use mly_lexer::ScanMode;
use tracing::trace;

use crate::Parser;

/// A set of syntax kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `SyntaxKind` discriminant index.
/// Expected-token sets in errors are `TokenSet`s, rendered as
/// "`%token`, `%start` or `%%`".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Create a token set containing a single kind.
    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        Self(1u128 << kind.index())
    }

    /// Add a kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self(self.0 | (1u128 << kind.index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if this set contains a kind.
    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        (self.0 & (1u128 << kind.index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member host-token kinds in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        HOST_TOKENS.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenSet {
    /// "a", "a or b", "a, b or c".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.iter().count();
        if count == 0 {
            return f.write_str("nothing");
        }
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == count { " or " } else { ", " })?;
            }
            f.write_str(&describe(kind))?;
        }
        Ok(())
    }
}

/// Kinds the lexer can hand to the recognizer, in discriminant order.
const HOST_TOKENS: [SyntaxKind; 38] = [
    SyntaxKind::PercentPercent,
    SyntaxKind::HeaderOpen,
    SyntaxKind::HeaderClose,
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
    SyntaxKind::Percent,
    SyntaxKind::UnknownDirective,
    SyntaxKind::Lt,
    SyntaxKind::Gt,
    SyntaxKind::LParen,
    SyntaxKind::RParen,
    SyntaxKind::LBrace,
    SyntaxKind::RBrace,
    SyntaxKind::LBracketAt,
    SyntaxKind::RBracket,
    SyntaxKind::Comma,
    SyntaxKind::Colon,
    SyntaxKind::Pipe,
    SyntaxKind::Equals,
    SyntaxKind::Dot,
    SyntaxKind::Question,
    SyntaxKind::Plus,
    SyntaxKind::Star,
    SyntaxKind::Uident,
    SyntaxKind::Lident,
    SyntaxKind::String,
    SyntaxKind::Unknown,
    SyntaxKind::Eof,
];

/// How a kind reads in "expected ..., found ..." messages.
///
/// Punctuation and directives are quoted; word classes are not.
pub fn describe(kind: SyntaxKind) -> String {
    match kind {
        SyntaxKind::Uident
        | SyntaxKind::Lident
        | SyntaxKind::String
        | SyntaxKind::Unknown
        | SyntaxKind::UnknownDirective
        | SyntaxKind::Eof => kind.display_name().to_owned(),
        _ if kind.is_named() => kind.display_name().to_owned(),
        _ => format!("`{}`", kind.display_name()),
    }
}

// Pre-defined token sets, computed at compile time.

/// Kinds that start a declaration.
pub const DECLARATION_START: TokenSet = TokenSet::new()
    .with(SyntaxKind::HeaderOpen)
    .with(SyntaxKind::TokenKw)
    .with(SyntaxKind::StartKw)
    .with(SyntaxKind::TypeKw)
    .with(SyntaxKind::LeftKw)
    .with(SyntaxKind::RightKw)
    .with(SyntaxKind::NonassocKw)
    .with(SyntaxKind::ParameterKw)
    .with(SyntaxKind::Percent)
    .with(SyntaxKind::AttributeKw)
    .with(SyntaxKind::OnErrorReduceKw);

/// Where declarations-phase recovery stops.
pub const DECLARATION_BOUNDARY: TokenSet = DECLARATION_START
    .with(SyntaxKind::PercentPercent)
    .with(SyntaxKind::Eof);

/// Kinds that may precede a rule name.
pub const RULE_FLAGS: TokenSet = TokenSet::new()
    .with(SyntaxKind::PublicKw)
    .with(SyntaxKind::InlineKw);

/// Where rules-phase recovery stops (besides a rule head).
pub const RULE_BOUNDARY: TokenSet = RULE_FLAGS
    .with(SyntaxKind::PercentPercent)
    .with(SyntaxKind::Eof);

/// Identifiers of either case.
pub const SYMBOL: TokenSet = TokenSet::new()
    .with(SyntaxKind::Uident)
    .with(SyntaxKind::Lident);

/// Repetition suffixes of an actual.
pub const SUFFIX: TokenSet = TokenSet::new()
    .with(SyntaxKind::Question)
    .with(SyntaxKind::Plus)
    .with(SyntaxKind::Star);

/// What may follow the producers of an alternative.
pub const ALTERNATIVE_FOLLOW: TokenSet = SYMBOL
    .with(SyntaxKind::PrecKw)
    .with(SyntaxKind::LBrace)
    .with(SyntaxKind::Pipe)
    .union(RULE_BOUNDARY);

/// Openers whose content is skipped as one opaque span during recovery.
/// `<` only opens a type in the declarations phase.
const DECLARATION_OPENERS: TokenSet = RULE_OPENERS.with(SyntaxKind::Lt);
const RULE_OPENERS: TokenSet = TokenSet::new()
    .with(SyntaxKind::HeaderOpen)
    .with(SyntaxKind::LBrace)
    .with(SyntaxKind::LBracketAt);

/// Scan mode and leaf kind for the content after `opener`.
fn foreign_content(opener: SyntaxKind) -> Option<(ScanMode, SyntaxKind)> {
    match opener {
        SyntaxKind::HeaderOpen => Some((ScanMode::CodeBlock, SyntaxKind::Ocaml)),
        SyntaxKind::LBrace => Some((ScanMode::SemanticAction, SyntaxKind::Ocaml)),
        SyntaxKind::Lt => Some((ScanMode::TypeAnnotation, SyntaxKind::OcamlType)),
        SyntaxKind::LBracketAt => Some((ScanMode::AttributePayload, SyntaxKind::AttributePayload)),
        _ => None,
    }
}

impl Parser<'_> {
    /// Skip to the next declaration keyword, `%%` or end of input.
    pub(crate) fn recover_declaration(&mut self) {
        self.skip_until(DECLARATION_OPENERS, |p| DECLARATION_BOUNDARY.contains(p.kind()));
    }

    /// Skip to the next rule head, `%%` or end of input.
    pub(crate) fn recover_rule(&mut self) {
        self.skip_until(RULE_OPENERS, |p| {
            RULE_BOUNDARY.contains(p.kind()) || p.at_rule_start()
        });
    }

    /// Wrap every token before the first one accepted by `stop` in an
    /// `Error` node. Nothing is emitted when already at a stopping point.
    ///
    /// OCaml after one of `openers` is never lexed as grammar text: the
    /// foreign scanner delimits it and the terminator is skipped as an
    /// ordinary token.
    fn skip_until(&mut self, openers: TokenSet, mut stop: impl FnMut(&mut Self) -> bool) {
        if stop(self) || self.lexer.error().is_some() {
            return;
        }
        let start = self.lexer.current().span.start;
        self.builder.start_node(SyntaxKind::Error);
        let mut skipped = 0usize;
        while !stop(self) && self.lexer.error().is_none() {
            let kind = self.kind();
            let opener = self.token();
            skipped += 1;
            if !openers.contains(kind) {
                continue;
            }
            if let Some((mode, leaf)) = foreign_content(kind) {
                if self.foreign(mode, opener.span, leaf).is_err() {
                    break;
                }
            }
        }
        self.builder.finish_node();
        trace!(start, skipped, "skipped tokens during recovery");
    }
}
