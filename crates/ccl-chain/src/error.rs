use ccl_crypto::LinkError;

/// Errors produced by chain appends and forward reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("forward read exhausted after {hops} hops ({elapsed_ms} ms)")]
    ReadExhausted { hops: u32, elapsed_ms: u64 },

    #[error("session state already consumed: slot {index} is occupied")]
    StaleSession { index: u64 },

    #[error("corrupt session token: {0}")]
    CorruptSession(String),

    #[error("restricted channel requires a non-empty side key")]
    MissingSideKey,

    #[error("broken chain: {0}")]
    BrokenChain(#[from] LinkError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
