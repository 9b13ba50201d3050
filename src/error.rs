//! Error types for stagetime
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, missing log file, invalid config)
//! - 3: No data (no task events survived filtering; metrics unavailable)
//! - 4: Operation failed (I/O error, corrupt compression frame, cancelled)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the stagetime CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const NO_DATA: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for stagetime operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Event log not found: {0}")]
    LogNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // No data (exit code 3)
    #[error("No task events found: nothing to aggregate")]
    NoData,

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Ingestion cancelled")]
    Cancelled,
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::LogNotFound(_) | Error::InvalidConfig(_) | Error::InvalidArgument(_) => {
                exit_codes::USER_ERROR
            }

            // Empty result set
            Error::NoData => exit_codes::NO_DATA,

            // Operation failures
            Error::Io(_)
            | Error::Decode { .. }
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::Cancelled => exit_codes::OPERATION_FAILED,
        }
    }

    /// Optional structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Decode { path, .. } => Some(serde_json::json!({
                "path": path.display().to_string(),
            })),
            _ => None,
        }
    }
}

/// Result type alias for stagetime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
