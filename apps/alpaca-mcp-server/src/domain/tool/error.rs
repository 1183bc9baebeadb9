//! Tool invocation errors.

use thiserror::Error;

/// Errors surfaced to the MCP client as tool-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Arguments did not match the tool's input schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Arguments were well-formed but rejected before calling upstream.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The upstream brokerage API call failed.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ToolError {
    /// Stable error code for structured responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::Validation(_) => "validation_failed",
            Self::Upstream(_) => "upstream_error",
        }
    }
}
