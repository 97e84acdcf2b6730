use ccl_chain::{ChannelConfig, Genesis};
use ccl_types::{Address, ChannelMode, Seed, SideKey, Timestamp};
use ccl_wallet::WalletIdentity;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Mutable custody record of one physical container.
///
/// Stored as JSON at its asset key. The stored bytes are also the payload
/// appended to the asset's chain, so the newest chain entry of a consistent
/// asset equals its record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub description: String,
    pub timestamp: Timestamp,
    pub location: String,
    pub holder: String,
}

impl Asset {
    pub fn new(
        description: impl Into<String>,
        location: impl Into<String>,
        holder: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            description: description.into(),
            timestamp,
            location: location.into(),
            holder: holder.into(),
        }
    }

    /// Hand the asset to `holder`, refreshing its timestamp.
    pub fn hand_over(&mut self, holder: impl Into<String>) {
        self.holder = holder.into();
        self.timestamp = Timestamp::refreshed(self.timestamp);
    }

    /// Canonical JSON form, used both as the stored record and the chain payload.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A party that can hold assets, stored at its role name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub role: String,
    pub description: String,
    #[serde(flatten)]
    pub wallet: WalletIdentity,
}

/// Pointer and session state of an asset's chain, stored at `CHAIN_<key>`.
///
/// `root` never changes after genesis; `session` is replaced by every
/// continuation append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainHead {
    pub seed: Seed,
    pub session: String,
    pub root: Address,
    pub mode: ChannelMode,
    pub side_key: SideKey,
}

impl ChainHead {
    pub fn from_genesis(genesis: Genesis, channel: &ChannelConfig) -> Result<Self, LedgerError> {
        Ok(Self {
            session: genesis.state.to_token()?,
            seed: genesis.seed,
            root: genesis.root,
            mode: channel.mode,
            side_key: channel.side_key.clone(),
        })
    }

    /// Channel settings the chain was started with.
    pub fn channel(&self) -> ChannelConfig {
        ChannelConfig {
            mode: self.mode,
            side_key: self.side_key.clone(),
        }
    }
}

/// Public part of a chain head, returned by queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPointer {
    pub root: Address,
    pub side_key: SideKey,
}

/// Result of `queryContainer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetView {
    pub container: Asset,
    pub mamstate: ChainPointer,
    /// Every chain payload from genesis on, joined with `", "`.
    pub messages: String,
    /// Payout address of the current holder.
    pub wallet: Address,
}

/// One row of `queryAllContainers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListedAsset {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: serde_json::Value,
}
