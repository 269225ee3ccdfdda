//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E2xxx: Executable resolution errors
/// - W2xxx: Executable resolution warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution Errors (E2xxx)
    /// More than one executable matches the supplied arguments
    E2001,
    /// Factory object produces a type incompatible with the expected one
    E2002,
    /// Named or nested reference revisits a component being resolved
    E2003,

    // Warnings
    /// No executable matches; component falls back to reflection
    W2001,
}

impl ErrorCode {
    /// All error codes, for exhaustive iteration.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::W2001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::W2001 => "W2001",
        }
    }

    /// One-line description, used in reports.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "ambiguous executable",
            ErrorCode::E2002 => "incompatible target type",
            ErrorCode::E2003 => "cyclic reference",
            ErrorCode::W2001 => "unresolved executable",
        }
    }

    /// Check if this is a resolution error (E2xxx range).
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"w2001"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
