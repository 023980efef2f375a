use thiserror::Error;

/// Errors that abort a run or surface from the tool-call transport
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("No documents found: {0}")]
    NoDocuments(String),

    #[error("Failed to connect to tool server: {0}")]
    ConnectionFailed(String),

    #[error("Tool call '{tool}' failed: {reason}")]
    Transport { tool: String, reason: String },

    #[error("Tool '{tool}' reported an error: {message}")]
    ToolError { tool: String, message: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Failure of a single step. Always names the target that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("click target not found: {0}")]
    ClickTargetNotFound(String),

    #[error("text not found: {0}")]
    TextNotFound(String),
}

impl StepError {
    /// Human-readable reason recorded by the reporter
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
