//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the docgate CLI.
///
/// - 0: Success
/// - 1: General error (unexpected failure)
/// - 2: Password rejected, or the command needs a session and none is valid
/// - 3: Search ran but found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Command completed normally.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The gate is closed.
    Locked = 2,
    /// The query was active but matched no pages.
    NoResults = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DG000",
            Self::GeneralError => "DG001",
            Self::Locked => "DG002",
            Self::NoResults => "DG003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DG001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
