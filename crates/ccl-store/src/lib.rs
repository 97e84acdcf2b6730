//! Record storage for the Container Custody Ledger.
//!
//! The custody ledger keeps every mutable record (assets, participants,
//! chain heads, and the operating wallet) in a single ordered key-value
//! space supplied by the host ledger. This crate defines that boundary and
//! the layout of the key space.
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`InMemoryRecordStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. The store never interprets record contents -- values are opaque bytes.
//! 2. Range scans return keys in the store's native (lexicographic) order.
//! 3. A put either fully replaces the value or fails; there are no partial writes.
//! 4. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use keys::{chain_head_key, validate_asset_key, KeyRange, CHAIN_PREFIX, WALLET_KEY};
pub use memory::InMemoryRecordStore;
pub use traits::{get_json, put_json, RecordStore};
