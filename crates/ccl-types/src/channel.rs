use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Visibility of an append-only chain.
///
/// - `Public`: entries live at their root and are readable by anyone.
/// - `Private`: entries live at a hash of the root; knowing the root is enough
///   to read.
/// - `Restricted`: entries live at a hash of the root and the side key; the
///   side key is required to locate and unmask them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    #[default]
    Public,
    Private,
    Restricted,
}

impl ChannelMode {
    /// Returns `true` if payloads are masked on this channel.
    pub fn is_confidential(&self) -> bool {
        !matches!(self, ChannelMode::Public)
    }

    /// Returns `true` if a non-empty side key is mandatory.
    pub fn requires_side_key(&self) -> bool {
        matches!(self, ChannelMode::Restricted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelMode::Public => "public",
            ChannelMode::Private => "private",
            ChannelMode::Restricted => "restricted",
        }
    }
}

impl FromStr for ChannelMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(ChannelMode::Public),
            "private" => Ok(ChannelMode::Private),
            "restricted" => Ok(ChannelMode::Restricted),
            other => Err(TypeError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address derivation strength. Higher levels produce longer key material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SecurityLevel {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl SecurityLevel {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SecurityLevel::Low),
            2 => Ok(SecurityLevel::Medium),
            3 => Ok(SecurityLevel::High),
            other => Err(TypeError::InvalidSecurityLevel(other)),
        }
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> Self {
        level.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Public".parse::<ChannelMode>().unwrap(), ChannelMode::Public);
        assert_eq!(" private ".parse::<ChannelMode>().unwrap(), ChannelMode::Private);
        assert_eq!(
            "RESTRICTED".parse::<ChannelMode>().unwrap(),
            ChannelMode::Restricted
        );
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = "secret".parse::<ChannelMode>().unwrap_err();
        assert_eq!(err, TypeError::UnknownMode("secret".into()));
    }

    #[test]
    fn mode_properties() {
        assert!(!ChannelMode::Public.is_confidential());
        assert!(ChannelMode::Private.is_confidential());
        assert!(!ChannelMode::Private.requires_side_key());
        assert!(ChannelMode::Restricted.requires_side_key());
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&ChannelMode::Restricted).unwrap();
        assert_eq!(json, "\"restricted\"");
    }

    #[test]
    fn security_level_bounds() {
        assert_eq!(SecurityLevel::try_from(2).unwrap(), SecurityLevel::Medium);
        assert_eq!(
            SecurityLevel::try_from(4).unwrap_err(),
            TypeError::InvalidSecurityLevel(4)
        );
        assert_eq!(SecurityLevel::High.as_u8(), 3);
    }

    #[test]
    fn security_level_serde_as_number() {
        let json = serde_json::to_string(&SecurityLevel::Low).unwrap();
        assert_eq!(json, "1");
        let parsed: SecurityLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, SecurityLevel::High);
    }
}
