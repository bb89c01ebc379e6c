//! Diagnostic system for grammar-file errors.
//!
//! Every diagnostic carries:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - optional secondary labels, notes and suggestions
//!
//! Lexical problems use `E0xxx` codes, syntactic problems `E1xxx`.
//! Emitters render diagnostics for terminals (with optional ANSI colour)
//! or as JSON for tooling.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
