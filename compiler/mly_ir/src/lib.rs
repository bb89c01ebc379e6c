//! Mly IR - shared syntax types for `.mly` grammar files
//!
//! This crate contains the data structures every other `mly_*` crate agrees
//! on:
//! - [`Span`] byte ranges into one source file
//! - [`SyntaxKind`] covering tokens, trivia, opaque OCaml spans and nodes
//! - [`Token`] as produced by the lexer
//! - [`SyntaxTree`], an immutable pre-order arena, and its [`TreeBuilder`]
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: nodes are `NodeId(u32)` indices, no `Box`ed children
//! - **Lossless**: leaves plus trivia reconstruct the source byte for byte
//! - **One kind type**: leaves and nodes share [`SyntaxKind`]

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod builder;
mod kind;
mod span;
mod token;
mod tree;

pub use builder::TreeBuilder;
pub use kind::SyntaxKind;
pub use span::{Span, SpanError};
pub use token::Token;
pub use tree::{Children, NodeId, SyntaxNode, SyntaxTree, Trivia};
