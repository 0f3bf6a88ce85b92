//! Error types shared by every tool exposed to an agent

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool-call operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// The caller supplied arguments or data the tool rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No tool is registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool processing failed
    #[error("Tool processing failed: {0}")]
    ProcessingFailed(String),
}

impl Error {
    /// Whether the failure was caused by the caller's input
    ///
    /// Agents use this to decide between fixing their arguments and giving up.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::ToolNotFound(_))
    }
}
