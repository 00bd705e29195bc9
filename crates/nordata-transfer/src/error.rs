use nordata_glob::PatternError;
use nordata_store::StoreError;

/// Errors from reconciling and running batch transfers.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// A path argument is neither a string nor a list of strings.
    #[error("invalid argument type: {0}")]
    InvalidArgumentType(String),

    /// Source and destination differ in kind (one single, one list).
    #[error("source and destination must be of the same type: source is a {source_kind}, destination is a {destination_kind}")]
    ShapeMismatch {
        source_kind: &'static str,
        destination_kind: &'static str,
    },

    /// A wildcard appeared inside an explicit list element.
    #[error("wildcards are not allowed in a list of paths: {0:?}")]
    WildcardNotAllowedInList(String),

    /// Source and destination lists have different lengths.
    #[error("the source list has {source_len} elements but the destination list has {destination_len}")]
    LengthMismatch {
        source_len: usize,
        destination_len: usize,
    },

    /// The wildcard pattern is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The bucket does not exist.
    #[error("bucket does not exist: {0}")]
    NamespaceNotFound(String),

    /// The store refused the caller's credentials.
    #[error("the credentials are expired or not valid: {0}")]
    AuthenticationExpiredOrInvalid(String),

    /// A single-object transfer failed for another reason.
    #[error("transfer of {key:?} failed: {cause}")]
    TransferFailed {
        key: String,
        #[source]
        cause: StoreError,
    },

    /// Listing a local directory for wildcard expansion failed.
    #[error("cannot list local directory {path:?}: {cause}")]
    LocalListing {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    /// The transfer configuration was rejected.
    #[error("invalid transfer config: {0}")]
    InvalidConfig(String),
}

impl TransferError {
    /// Classify a store failure that happened while working on `key`.
    pub fn from_store(key: &str, err: StoreError) -> Self {
        match err {
            StoreError::NamespaceNotFound(name) => Self::NamespaceNotFound(name),
            StoreError::AuthenticationExpiredOrInvalid(msg) => {
                Self::AuthenticationExpiredOrInvalid(msg)
            }
            cause => Self::TransferFailed {
                key: key.to_string(),
                cause,
            },
        }
    }

    /// Returns `true` for errors raised before any I/O was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgumentType(_)
                | Self::ShapeMismatch { .. }
                | Self::WildcardNotAllowedInList(_)
                | Self::LengthMismatch { .. }
                | Self::Pattern(_)
        )
    }
}

/// Result alias for transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;
