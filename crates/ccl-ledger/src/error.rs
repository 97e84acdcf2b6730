use ccl_chain::ChainError;
use ccl_store::StoreError;
use ccl_wallet::SequencerError;

/// Errors produced by custody ledger operations.
///
/// The `Display` form is the message a failed operation reports to its
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("could not locate {0}")]
    NotFound(String),

    #[error("failed to write {key}: {reason}")]
    WriteFailure { key: String, reason: String },

    #[error("invalid operation name: {0}")]
    InvalidOperation(String),

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("payment error: {0}")]
    Payment(#[from] SequencerError),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    pub(crate) fn write_failure(key: &str, err: StoreError) -> Self {
        Self::WriteFailure {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Read-side store failures. Corrupt records surface as serialization errors.
impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Serialization(message) => Self::Serialization(message),
            other => Self::Store(other),
        }
    }
}
