use std::path::Path;
use std::time::Duration;

use ccl_chain::{ChainError, ChannelConfig, ReadLimits};
use ccl_store::KeyRange;
use ccl_types::{ChannelMode, SecurityLevel, Seed};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Environment variable overriding the channel mode.
pub const ENV_MODE: &str = "CCL_MODE";
/// Environment variable overriding the raw side key.
pub const ENV_SIDE_KEY: &str = "CCL_SIDE_KEY";

/// Custody ledger configuration.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Key interval scanned by `queryAllContainers`.
    pub key_range: KeyRange,
    /// Channel mode for newly started chains.
    pub mode: ChannelMode,
    /// Raw side key; padded to a full tryte string before use.
    pub side_key: String,
    pub security: SecurityLevel,
    /// Value paid to the previous holder on every custody transfer.
    pub payment_amount: u64,
    pub wallet: WalletConfig,
    /// Upper bound on non-empty fetches during one forward read.
    pub max_hops: u32,
    pub read_timeout_ms: u64,
}

/// Operating wallet written by bootstrap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Seed of the operating wallet. A fresh seed is generated when unset.
    pub seed: Option<Seed>,
    pub start_index: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            key_range: KeyRange::default(),
            mode: ChannelMode::Public,
            side_key: String::new(),
            security: SecurityLevel::Medium,
            payment_amount: 1,
            wallet: WalletConfig::default(),
            max_hops: 10_000,
            read_timeout_ms: 30_000,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, LedgerError> {
        toml::from_str(text).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Apply `CCL_MODE` / `CCL_SIDE_KEY` from the process environment.
    pub fn apply_env(&mut self) -> Result<(), LedgerError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), LedgerError> {
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode
                .parse()
                .map_err(|e| LedgerError::Config(format!("{ENV_MODE}: {e}")))?;
        }
        if let Some(side_key) = lookup(ENV_SIDE_KEY) {
            self.side_key = side_key;
        }
        Ok(())
    }

    /// Channel settings for new chains.
    pub fn channel(&self) -> Result<ChannelConfig, ChainError> {
        ChannelConfig::new(self.mode, &self.side_key)
    }

    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits {
            max_hops: self.max_hops,
            timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = LedgerConfig::default();
        assert_eq!(c.key_range, KeyRange::new("0", "999"));
        assert_eq!(c.mode, ChannelMode::Public);
        assert_eq!(c.security, SecurityLevel::Medium);
        assert_eq!(c.payment_amount, 1);
        assert!(c.wallet.seed.is_none());
        assert_eq!(c.read_limits().timeout, Duration::from_secs(30));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = LedgerConfig::from_toml(
            r#"
            mode = "restricted"
            side_key = "mysecret"
            payment_amount = 5

            [wallet]
            start_index = 3
            "#,
        )
        .unwrap();
        assert_eq!(c.mode, ChannelMode::Restricted);
        assert_eq!(c.payment_amount, 5);
        assert_eq!(c.wallet.start_index, 3);
        assert_eq!(c.max_hops, 10_000);
        assert!(c.channel().unwrap().side_key.as_str().starts_with("MYSECRET9"));
    }

    #[test]
    fn invalid_seed_is_rejected() {
        let err = LedgerConfig::from_toml("[wallet]\nseed = \"lowercase\"\n").unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "security = 3").unwrap();
        writeln!(file, "[key_range]\nstart = \"1\"\nend = \"5\"").unwrap();

        let c = LedgerConfig::load(file.path()).unwrap();
        assert_eq!(c.security, SecurityLevel::High);
        assert_eq!(c.key_range, KeyRange::new("1", "5"));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LedgerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn overrides_replace_mode_and_side_key() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_MODE, "Private"), (ENV_SIDE_KEY, "abc")]);
        let mut c = LedgerConfig::default();
        c.apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(c.mode, ChannelMode::Private);
        assert_eq!(c.side_key, "abc");
    }

    #[test]
    fn bad_mode_override_fails() {
        let mut c = LedgerConfig::default();
        let err = c
            .apply_overrides(|name| (name == ENV_MODE).then(|| "loud".to_string()))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
        assert_eq!(c.mode, ChannelMode::Public);
    }

    #[test]
    fn restricted_without_side_key_fails_channel() {
        let c = LedgerConfig {
            mode: ChannelMode::Restricted,
            ..LedgerConfig::default()
        };
        assert_eq!(c.channel().unwrap_err(), ChainError::MissingSideKey);
    }
}
