//! Shared error type across dailytally crates.

use thiserror::Error;

/// Stable error codes surfaced to logs and operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// A retention cleanup pass failed.
    CleanupFailed,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::CleanupFailed => "CLEANUP_FAILED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("cleanup failed: {0}")]
    Cleanup(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map an error to its stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::BadRequest(_) => ClientCode::BadRequest,
            MetricsError::Cleanup(_) => ClientCode::CleanupFailed,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
