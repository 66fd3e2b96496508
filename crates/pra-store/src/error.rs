/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key cannot be mapped onto this backend.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The declared content length disagrees with the body.
    #[error("content length mismatch for {key}: declared {declared}, actual {actual}")]
    LengthMismatch {
        key: String,
        declared: u64,
        actual: u64,
    },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend could not service the request.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
