use std::time::Duration;

use ccl_types::{ChannelMode, SideKey};
use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Visibility settings shared by a chain's writer and its readers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub mode: ChannelMode,
    pub side_key: SideKey,
}

impl ChannelConfig {
    /// Build a validated channel configuration.
    ///
    /// The raw side key is padded to a full tryte string.
    pub fn new(mode: ChannelMode, raw_side_key: &str) -> Result<Self, ChainError> {
        let config = Self {
            mode,
            side_key: SideKey::pad(raw_side_key),
        };
        config.validate()?;
        Ok(config)
    }

    /// A public channel with no side key.
    pub fn public() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ChainError> {
        if self.mode.requires_side_key() && self.side_key.is_empty() {
            return Err(ChainError::MissingSideKey);
        }
        Ok(())
    }
}

/// Bounds on a single forward read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadLimits {
    /// Maximum number of transport fetches that return entries.
    pub max_hops: u32,
    /// Wall-clock budget for the whole walk.
    pub timeout: Duration,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_hops: 10_000,
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restricted_without_side_key_is_rejected() {
        assert_eq!(
            ChannelConfig::new(ChannelMode::Restricted, "").unwrap_err(),
            ChainError::MissingSideKey
        );
        // Characters outside the alphabet are dropped, leaving nothing.
        assert!(ChannelConfig::new(ChannelMode::Restricted, "---").is_err());
    }

    #[test]
    fn side_key_is_padded() {
        let config = ChannelConfig::new(ChannelMode::Restricted, "secret").unwrap();
        assert_eq!(config.side_key.as_str().len(), 81);
        assert!(config.side_key.as_str().starts_with("SECRET9"));
    }

    #[test]
    fn public_and_private_accept_empty_side_key() {
        assert!(ChannelConfig::new(ChannelMode::Public, "").is_ok());
        assert!(ChannelConfig::new(ChannelMode::Private, "").is_ok());
        assert_eq!(ChannelConfig::public().mode, ChannelMode::Public);
    }
}
