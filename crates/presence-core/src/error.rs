//! Shared error type across presence crates.
//!
//! Store operations are total and never return these; they cover the
//! surrounding layers (config loading, request validation, bootstrap).

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PresenceError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PresenceError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PresenceError::BadRequest(_) => ClientCode::BadRequest,
            PresenceError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            PresenceError::Internal(_) => ClientCode::Internal,
        }
    }
}
