//! Error types for flavy-av.

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or invoking the external tools.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool failed to start or exited with a non-zero status.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// An external tool did not finish within its time budget.
    #[error("tool timed out: {tool} did not finish within {timeout:?}")]
    Timeout { tool: String, timeout: Duration },

    /// Failed to parse tool output.
    #[error("failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// A query succeeded but returned columns that do not line up.
    #[error("integrity error in {query}: {message}")]
    Integrity { query: String, message: String },

    /// A clock string could not be converted to seconds.
    #[error("invalid timestamp {input:?}: {message}")]
    InvalidTimestamp { input: String, message: String },

    /// The specified file was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(tool: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            tool: tool.into(),
            timeout,
        }
    }

    /// Create a parse error.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an integrity error.
    pub fn integrity(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Integrity {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Whether the external command itself could not be run to a usable result:
    /// missing binary, non-zero exit, timeout, or unparsable output.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound { .. }
                | Self::ToolFailed { .. }
                | Self::Timeout { .. }
                | Self::ParseError { .. }
        )
    }
}
