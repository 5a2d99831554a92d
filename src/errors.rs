//! Typed error taxonomy for the conformance model
//!
//! Every fallible operation on the core model returns one of these kinds so
//! callers (CLI, HTTP API) can map them to exit codes / status codes without
//! string matching. Retrying on `Concurrency` is the caller's decision; the
//! model never retries or silently recovers.

/// Result type for conformance model operations
pub type AcrResult<T> = Result<T, AcrError>;

/// Errors that can occur when working with reports and versions
#[derive(Debug, thiserror::Error)]
pub enum AcrError {
    /// Bad input shape or a missing required field
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown report, criterion, or version
    #[error("not found: {0}")]
    NotFound(String),

    /// Attempted to snapshot a report that has no criteria
    #[error("empty report: {0}")]
    EmptyReport(String),

    /// Optimistic check on the version counter failed; safe to retry
    #[error("concurrent version write detected: {0}")]
    Concurrency(String),

    /// Underlying store I/O failure
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or unreadable on-disk state
    #[error("failed to parse stored state: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AcrError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AcrError::Validation(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        AcrError::NotFound(msg.into())
    }

    /// True when a retry of the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, AcrError::Concurrency(_))
    }
}
