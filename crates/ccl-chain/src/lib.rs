//! Append-only asset history for the Container Custody Ledger (CCL).
//!
//! Each asset owns a forward-only chain of entries on a [`LogTransport`].
//! A chain is extended with an opaque, single-use [`SessionState`] and read
//! forward from its root by following next-root pointers.
//!
//! - [`ChainWriter`] -- genesis and continuation appends
//! - [`ChainReader`] / [`ForwardWalk`] -- bounded forward reads
//! - [`ChannelConfig`] -- channel mode and side key, passed explicitly
//! - [`InMemoryTangle`] -- reference transport for tests and embedding

pub mod config;
pub mod error;
pub mod memory;
pub mod reader;
pub mod session;
pub mod transport;
pub mod writer;

pub use config::{ChannelConfig, ReadLimits};
pub use error::ChainError;
pub use memory::InMemoryTangle;
pub use reader::{ChainReader, ForwardWalk};
pub use session::SessionState;
pub use transport::{Entry, LogTransport};
pub use writer::{ChainWriter, Genesis};
