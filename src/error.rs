//! Error types for codey-context

use thiserror::Error;

/// Result type for formatting operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Errors that can occur while building model-facing content
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
