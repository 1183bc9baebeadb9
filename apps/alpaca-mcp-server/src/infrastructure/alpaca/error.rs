//! Alpaca-specific error types.

use thiserror::Error;

use crate::domain::tool::ToolError;

/// Errors from the Alpaca gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlpacaError {
    /// Request arguments were rejected before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A configured base URL could not be used.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// API returned an error.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from the API (or the HTTP status).
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Order or request was rejected (422).
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Resource not found.
    #[error("Not found: {path}")]
    NotFound {
        /// Request path that returned 404.
        path: String,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl AlpacaError {
    /// Shorthand for [`AlpacaError::InvalidRequest`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<AlpacaError> for ToolError {
    fn from(err: AlpacaError) -> Self {
        match err {
            AlpacaError::InvalidRequest(msg) => Self::Validation(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}
