//! Foundation types for the Container Custody Ledger (CCL).
//!
//! This crate provides the identity, channel, and temporal types shared by
//! every other CCL crate.
//!
//! # Key Types
//!
//! - [`Seed`] -- 81-character tryte seed backing a wallet or a chain identity
//! - [`Address`] -- 81-tryte chain root, entry location, or payout address
//! - [`SideKey`] -- padded confidentiality key for private/restricted channels
//! - [`ChannelMode`] -- visibility of an append-only chain
//! - [`SecurityLevel`] -- address derivation strength
//! - [`Timestamp`] -- millisecond wall-clock stamp, stored as a decimal string

pub mod channel;
pub mod error;
pub mod identity;
pub mod timestamp;

pub use channel::{ChannelMode, SecurityLevel};
pub use error::TypeError;
pub use identity::{Address, Seed, SideKey, TRYTE_ALPHABET, TRYTE_LEN};
pub use timestamp::Timestamp;
