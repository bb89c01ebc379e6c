//! Low-level scanner for `.mly` grammar files.
//!
//! This crate is standalone: it knows nothing about syntax trees, spans or
//! diagnostics. It turns bytes into `(RawTag, len)` pairs and, on request,
//! delimits embedded OCaml with a [`ForeignScanner`].
//!
//! - [`SourceBuffer`] owns a sentinel-terminated copy of the source
//! - [`Cursor`] walks the buffer without bounds checks on the hot path
//! - [`RawScanner`] produces one [`RawToken`] per call
//! - [`OcamlScanner`] finds the end of headers, actions, types, payloads
//!   and comments
//!
//! Keyword resolution, identifier case and error reporting happen in the
//! cooking layer (`mly_lexer`).

mod class;
mod cursor;
mod foreign;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use class::{
    ident_case, is_ident_continue, is_ident_start, is_ocaml_ident_continue, IdentCase,
};
pub use cursor::{is_whitespace, Cursor};
pub use foreign::{
    ForeignError, ForeignErrorKind, ForeignScanner, ForeignSpan, OcamlScanner, ScanMode,
};
pub use raw_scanner::{tokenize, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
