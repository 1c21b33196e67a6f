//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the spacesweep application.
///
/// - 0: Success (operation completed and produced results)
/// - 1: General error (unexpected failure)
/// - 2: Nothing found (scan completed with no matches)
/// - 3: Partial success (batch completed with some failures)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// The operation completed and produced results.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The scan completed but found nothing.
    NothingFound = 2,
    /// The batch completed but some items failed.
    PartialSuccess = 3,
    /// The operation was interrupted by the user (Ctrl+C).
    Interrupted = 130,
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
            Self::Success => "SW000",
            Self::GeneralError => "SW001",
            Self::NothingFound => "SW002",
            Self::PartialSuccess => "SW003",
            Self::Interrupted => "SW130",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "SW001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}
