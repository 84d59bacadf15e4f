//! Error types for discuss

use thiserror::Error;

/// Main error type for discuss
#[derive(Debug, Error)]
pub enum DiscussError {
    /// Validation error (malformed or missing required field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// Root scope not found
    #[error("Scope not found: {0}")]
    ScopeNotFound(String),

    /// Mutator is not the original author
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unrecognized reaction or flag kind
    #[error("Invalid kind: {0}")]
    InvalidKind(String),

    /// Concurrent mutation detected; the caller should retry
    #[error("Conflict: {0}")]
    Conflict(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported snapshot schema version
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DiscussError>,
    },
}

impl DiscussError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DiscussError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for discuss
pub type Result<T> = std::result::Result<T, DiscussError>;
