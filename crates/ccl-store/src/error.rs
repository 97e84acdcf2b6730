/// Errors from record store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend refused to write the given key.
    #[error("write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },

    /// The key does not belong to the expected namespace.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
