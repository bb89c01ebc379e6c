use std::fmt;

/// Error codes for all grammar-file diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexical errors (always fatal)
/// - E1xxx: Syntax errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated `/* */` comment
    E0001,
    /// Unterminated `(* *)` comment
    E0002,
    /// Unterminated string literal
    E0003,
    /// Unterminated OCaml span (`%{`, `{`, `<` or `[@` without terminator)
    E0004,
    /// Invalid character in source
    E0005,
    /// Source exceeds the configured size budget
    E0006,

    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected element missing
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Missing `%%` separator
    E1004,
    /// Unknown directive
    E1005,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
        }
    }

    /// Short description of the error class.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated block comment",
            ErrorCode::E0002 => "unterminated OCaml comment",
            ErrorCode::E0003 => "unterminated string literal",
            ErrorCode::E0004 => "unterminated OCaml code, type or payload",
            ErrorCode::E0005 => "invalid character",
            ErrorCode::E0006 => "source too large",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected element missing",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "missing `%%` separator",
            ErrorCode::E1005 => "unknown directive",
        }
    }

    /// Check if this is a lexical error (E0xxx).
    pub fn is_lexical(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a syntax error (E1xxx).
    pub fn is_syntax(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
