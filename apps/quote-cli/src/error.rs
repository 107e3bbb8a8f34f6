//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in quote-cli                              │
//! │                                                                         │
//! │  Command Function: Result<(), ApiError>                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Config Error? ──── ConfigError::Invalid ─────────┐                     │
//! │         │                                         │                     │
//! │         ▼                                         │                     │
//! │  Snapshot Error? ── SnapshotError::Parse ─────────┤                     │
//! │         │                                         ▼                     │
//! │  Quote Error? ───── QuoteError::ItemNotFound ── ApiError ──► stderr     │
//! │         │                                                  exit 1       │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────────► stdout     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quote_core::QuoteError;
use serde::Serialize;

use crate::config::ConfigError;
use crate::snapshot::SnapshotError;

/// Error reported by a failed command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Catalog item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog item not found
    NotFound,

    /// Request validation failed
    ValidationError,

    /// Configuration missing or invalid
    ConfigError,

    /// Snapshot or request file unreadable or malformed
    SnapshotError,

    /// Output could not be written
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// One-line JSON form written on failure.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{{\"code\":\"INTERNAL\",\"message\":{:?}}}",
                self.message
            )
        })
    }
}

/// Converts core errors to CLI errors.
impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::ItemNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            QuoteError::InvalidInput(_) | QuoteError::DuplicateItem(_) => {
                ApiError::validation(err.to_string())
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::config(err.to_string())
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        match err {
            // Bad catalog content is a data problem, keep the core's code
            SnapshotError::Catalog(e) => ApiError::from(e),
            other => ApiError::new(ErrorCode::SnapshotError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Failed to write output: {}", err);
        ApiError::internal("Failed to write output")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
