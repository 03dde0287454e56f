//! Error types for brandkb-core.

use thiserror::Error;

/// Result type alias using brandkb-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for knowledge-base operations
#[derive(Error, Debug)]
pub enum Error {
    // Caller errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to delete knowledge base: knowledge base {timestamp} not found in database")]
    NotFound { timestamp: String },

    // Remote store errors
    #[error("Failed to {action} knowledge base: {reason}")]
    Persistence { action: &'static str, reason: String },

    #[error("Remote store error: {0}")]
    Remote(String),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    // Local cache errors (never surfaced by the store)
    #[error("Cache error: {0}")]
    Cache(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for a record timestamp
    pub fn not_found(timestamp: impl Into<String>) -> Self {
        Self::NotFound {
            timestamp: timestamp.into(),
        }
    }

    /// Wrap a lower-level failure as a persistence error for `action`
    pub fn persistence(action: &'static str, source: impl std::fmt::Display) -> Self {
        Self::Persistence {
            action,
            reason: source.to_string(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a persistence error
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
