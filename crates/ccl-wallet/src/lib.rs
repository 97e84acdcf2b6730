//! Address sequencer for the Container Custody Ledger (CCL).
//!
//! Every payment consumes one key index of a wallet identity: the sender
//! address is derived from `(seed, index, security)` and the remainder lands
//! on the address at `index + 1`. Reusing an index exposes the wallet's
//! signing material, so this crate owns the rule that no index is ever issued
//! twice.
//!
//! - [`AddressSequencer`] -- pure address issuance and index-advance checks
//! - [`WalletIdentity`] -- seed, current key index, and current address
//! - [`PaymentSender`] -- spent/balance-checked value transfer over a
//!   [`ValueNetwork`]
//! - [`InMemoryValueNetwork`] -- reference network for tests and embedding

pub mod error;
pub mod memory;
pub mod network;
pub mod sequencer;
pub mod transfer;

pub use error::{NetworkError, SequencerError};
pub use memory::InMemoryValueNetwork;
pub use network::{Bundle, ValueNetwork};
pub use sequencer::{AddressSequencer, IssuedAddress, WalletIdentity};
pub use transfer::PaymentSender;
