use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid tryte string: {0}")]
    InvalidTrytes(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown channel mode: {0}")]
    UnknownMode(String),

    #[error("invalid security level: {0}")]
    InvalidSecurityLevel(u8),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
