//! Derivation primitives for the Container Custody Ledger.
//!
//! Provides domain-separated BLAKE3 derivation of chain roots, entry
//! addresses, and wallet addresses, payload masking for confidential
//! channels, and entry-link verification for append-only chains.
//!
//! All primitives are built on BLAKE3; there is no custom cryptography.

pub mod derive;
pub mod hasher;
pub mod link;

pub use derive::{channel_root, entry_address, mask_payload, wallet_address};
pub use hasher::ContentHasher;
pub use link::{EntryLinkVerifier, HasEntryLink, LinkError};
