//! Container Custody Ledger (CCL).
//!
//! Tracks the custody of physical containers in a host key-value ledger and
//! keeps each container's full history on an append-only chain. Every
//! custody hand-off also pays the previous holder from a shared operating
//! wallet.
//!
//! This crate provides:
//! - Record types for assets, participants, and chain heads
//! - [`CustodyLedger`] with bootstrap, record, query, list, and transfer
//! - A read-only consistency audit for the windows a partial failure leaves
//! - [`dispatch::invoke`], the named-operation surface a host calls into
//! - [`LedgerConfig`], loaded from TOML with environment overrides

pub mod audit;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod records;
pub mod seed_data;

pub use audit::{ConsistencyReport, Violation, ViolationKind};
pub use config::LedgerConfig;
pub use dispatch::{invoke, Response};
pub use error::LedgerError;
pub use ledger::{CustodyLedger, TRANSFER_SUCCESS};
pub use records::{Asset, AssetView, ChainHead, ChainPointer, ListedAsset, Participant};
