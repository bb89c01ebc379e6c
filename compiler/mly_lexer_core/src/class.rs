//! Byte classes for identifiers.
//!
//! Symbol kind is decided purely by the case of the first byte:
//! `[A-Z][a-zA-Z0-9_]*` is a terminal, `[a-z_][a-zA-Z0-9_]*` a nonterminal.

/// Case of an identifier's first byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentCase {
    /// Starts with `A-Z`: a terminal.
    Capitalized,
    /// Starts with `a-z` or `_`: a nonterminal.
    Lowercase,
}

/// 256-byte lookup table for identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore.
/// The sentinel byte (0x00) maps to `false`, naturally terminating loops.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` can start a host identifier.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Returns `true` if `b` can continue a host identifier.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// OCaml identifiers additionally allow primes (`x'`, `f''`).
#[inline]
pub fn is_ocaml_ident_continue(b: u8) -> bool {
    is_ident_continue(b) || b == b'\''
}

/// Classify an identifier by its first byte.
///
/// Returns `None` for text that does not start like an identifier.
pub fn ident_case(text: &str) -> Option<IdentCase> {
    match text.as_bytes().first()? {
        b'A'..=b'Z' => Some(IdentCase::Capitalized),
        b'a'..=b'z' | b'_' => Some(IdentCase::Lowercase),
        _ => None,
    }
}
