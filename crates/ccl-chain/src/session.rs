use ccl_crypto::{channel_root, entry_address};
use ccl_types::{Address, ChannelMode, Seed, SideKey};
use serde::{Deserialize, Serialize};

use crate::config::ChannelConfig;
use crate::error::ChainError;

/// Everything needed to extend a chain by one entry.
///
/// A session state is an immutable value. Appending consumes it and returns
/// its successor; persisting it between operations goes through
/// [`SessionState::to_token`] and [`SessionState::from_token`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    seed: Seed,
    mode: ChannelMode,
    side_key: SideKey,
    index: u64,
    last_link: Option<[u8; 32]>,
}

impl SessionState {
    /// A session positioned at the first slot of a fresh chain.
    pub(crate) fn start(seed: Seed, channel: &ChannelConfig) -> Self {
        Self {
            seed,
            mode: channel.mode,
            side_key: channel.side_key.clone(),
            index: 0,
            last_link: None,
        }
    }

    /// The state after an entry with `link` was written at the current slot.
    pub(crate) fn advanced(self, link: [u8; 32]) -> Result<Self, ChainError> {
        let index = self
            .index
            .checked_add(1)
            .ok_or_else(|| ChainError::Serialization("channel index overflow".into()))?;
        Ok(Self {
            index,
            last_link: Some(link),
            ..self
        })
    }

    /// Channel slot the next entry will occupy.
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn side_key(&self) -> &SideKey {
        &self.side_key
    }

    pub(crate) fn seed(&self) -> &Seed {
        &self.seed
    }

    pub(crate) fn last_link(&self) -> Option<[u8; 32]> {
        self.last_link
    }

    /// Root of the slot the next entry will occupy.
    pub fn next_root(&self) -> Address {
        channel_root(&self.seed, self.index)
    }

    /// Transport address of the slot the next entry will occupy.
    pub(crate) fn next_address(&self) -> Address {
        entry_address(&self.next_root(), self.mode, &self.side_key)
    }

    /// Encode as an opaque token for storage.
    pub fn to_token(&self) -> Result<String, ChainError> {
        let bytes =
            bincode::serialize(self).map_err(|e| ChainError::Serialization(e.to_string()))?;
        Ok(hex::encode(bytes))
    }

    /// Decode a token produced by [`SessionState::to_token`].
    pub fn from_token(token: &str) -> Result<Self, ChainError> {
        let bytes = hex::decode(token).map_err(|e| ChainError::CorruptSession(e.to_string()))?;
        bincode::deserialize(&bytes).map_err(|e| ChainError::CorruptSession(e.to_string()))
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("mode", &self.mode)
            .field("index", &self.index)
            .field("has_link", &self.last_link.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        let seed = Seed::parse(&"K".repeat(81)).unwrap();
        SessionState::start(seed, &ChannelConfig::public())
    }

    #[test]
    fn token_roundtrip_preserves_state() {
        let advanced = state().advanced([7u8; 32]).unwrap();
        let token = advanced.to_token().unwrap();
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(SessionState::from_token(&token).unwrap(), advanced);
    }

    #[test]
    fn malformed_tokens_are_corrupt() {
        assert!(matches!(
            SessionState::from_token("zz-not-hex"),
            Err(ChainError::CorruptSession(_))
        ));
        assert!(matches!(
            SessionState::from_token("00ff"),
            Err(ChainError::CorruptSession(_))
        ));
    }

    #[test]
    fn advancing_moves_to_the_next_root() {
        let first = state();
        let root0 = first.next_root();
        let second = first.advanced([1u8; 32]).unwrap();
        assert_eq!(second.index(), 1);
        assert_ne!(second.next_root(), root0);
        assert_eq!(second.last_link(), Some([1u8; 32]));
    }

    #[test]
    fn debug_hides_seed() {
        let debug = format!("{:?}", state());
        assert!(!debug.contains("KKKK"));
        assert!(debug.contains("index"));
    }
}
