/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing namespace (bucket) does not exist.
    #[error("bucket does not exist: {0}")]
    NamespaceNotFound(String),

    /// The store rejected the caller's credentials.
    #[error("the credentials were expired or incorrect: {0}")]
    AuthenticationExpiredOrInvalid(String),

    /// The requested key was not found.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The key cannot be stored by this backend.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The transfer configuration is unusable.
    #[error("invalid transfer config: {0}")]
    InvalidConfig(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
