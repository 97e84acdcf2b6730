use ccl_types::Address;

/// Errors from address issuance and value transfer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError {
    #[error("input address {0} was already spent from")]
    AlreadySpent(Address),

    #[error("insufficient balance on {address}: have {available}, need {required}")]
    InsufficientBalance {
        address: Address,
        available: u64,
        required: u64,
    },

    #[error("transfer failed: {0}")]
    TransferFailed(#[from] NetworkError),

    #[error("key index regression: persisted {persisted}, proposed {proposed}")]
    IndexRegression { persisted: u64, proposed: u64 },

    #[error("key index {0} cannot be advanced")]
    IndexOverflow(u64),
}

/// Lower-level failure reported by a value network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct NetworkError(pub String);
