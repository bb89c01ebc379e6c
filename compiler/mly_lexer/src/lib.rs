//! Lexer for `.mly` grammar files.
//!
//! Sits between the raw scanner (`mly_lexer_core`) and the recognizer:
//!
//! ```text
//! source → RawScanner → (RawTag, len) → cook → Token / Trivia / LexError
//! ```
//!
//! The recognizer pulls one token at a time. Lookahead is lazy: a token is
//! only lexed when the recognizer asks for it, so right after a trigger
//! (`%{`, `{`, `<`, an attribute id) the recognizer can hand the following
//! bytes to the foreign scanner instead of tokenizing them.

mod cooker;
mod lex_error;
mod lexer;

pub use lex_error::LexError;
pub use lexer::{Lexer, LexerSnapshot};
pub use mly_lexer_core::{is_whitespace, ForeignErrorKind, ScanMode, SourceBuffer};
