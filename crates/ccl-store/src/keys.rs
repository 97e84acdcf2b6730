//! Layout of the custody ledger key space.
//!
//! - asset records live at caller-chosen keys (e.g. `"42"`)
//! - each asset's chain head lives at `CHAIN_<asset key>`
//! - participant records live at their role name (e.g. `"Producer"`)
//! - the shared operating wallet lives at the sentinel key `WALLET`
//!
//! Asset keys must not shadow a derived key or the sentinel.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Prefix of every chain head key.
pub const CHAIN_PREFIX: &str = "CHAIN_";

/// Sentinel key of the shared operating wallet.
pub const WALLET_KEY: &str = "WALLET";

/// The chain head key of an asset.
pub fn chain_head_key(asset_key: &str) -> String {
    format!("{CHAIN_PREFIX}{asset_key}")
}

/// Validate a caller-chosen asset key.
pub fn validate_asset_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "asset key must not be empty".into(),
        });
    }
    if key.starts_with(CHAIN_PREFIX) {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: format!("asset key must not start with {CHAIN_PREFIX:?}"),
        });
    }
    if key == WALLET_KEY {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "asset key must not equal the wallet sentinel".into(),
        });
    }
    Ok(())
}

/// Half-open key interval `[start, end)` scanned by bulk listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: String,
    pub end: String,
}

impl KeyRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns `true` if `key` falls inside the range.
    pub fn contains(&self, key: &str) -> bool {
        self.start.as_str() <= key && key < self.end.as_str()
    }
}

impl Default for KeyRange {
    /// The numeric asset namespace: `"0"` up to (excluding) `"999"`.
    fn default() -> Self {
        Self::new("0", "999")
    }
}
