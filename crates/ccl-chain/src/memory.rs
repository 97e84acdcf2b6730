use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use ccl_types::Address;

use crate::error::ChainError;
use crate::transport::{Entry, LogTransport};

/// In-memory log transport for tests, local demos, and embedding.
pub struct InMemoryTangle {
    inner: RwLock<HashMap<Address, Vec<Entry>>>,
    online: AtomicBool,
}

impl InMemoryTangle {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Total number of attached entries across all addresses.
    pub fn entry_count(&self) -> usize {
        self.inner
            .read()
            .map(|map| map.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Take the transport offline: every call fails until brought back.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Replace the entries at `address` wholesale, bypassing all checks.
    pub fn overwrite(&self, address: &Address, entries: Vec<Entry>) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(address.clone(), entries);
        }
    }

    fn ensure_online(&self) -> Result<(), ChainError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ChainError::Transport("tangle unreachable".into()))
        }
    }
}

impl Default for InMemoryTangle {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTransport for InMemoryTangle {
    fn attach(&self, address: &Address, entry: Entry) -> Result<(), ChainError> {
        self.ensure_online()?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| ChainError::Transport("tangle write lock poisoned".into()))?;
        map.entry(address.clone()).or_default().push(entry);
        Ok(())
    }

    fn fetch(&self, address: &Address) -> Result<Vec<Entry>, ChainError> {
        self.ensure_online()?;
        let map = self
            .inner
            .read()
            .map_err(|_| ChainError::Transport("tangle read lock poisoned".into()))?;
        Ok(map.get(address).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryTangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTangle")
            .field("entry_count", &self.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(c: char) -> Address {
        Address::parse(&c.to_string().repeat(81)).unwrap()
    }

    fn entry(payload: &[u8]) -> Entry {
        Entry {
            payload: payload.to_vec(),
            next_root: address('N'),
            link: [0u8; 32],
            prev_link: None,
        }
    }

    #[test]
    fn attach_and_fetch_in_order() {
        let tangle = InMemoryTangle::new();
        tangle.attach(&address('A'), entry(b"one")).unwrap();
        tangle.attach(&address('A'), entry(b"two")).unwrap();

        let fetched = tangle.fetch(&address('A')).unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].payload, b"one");
        assert_eq!(tangle.entry_count(), 2);
    }

    #[test]
    fn unknown_address_is_empty() {
        let tangle = InMemoryTangle::new();
        assert!(tangle.fetch(&address('Z')).unwrap().is_empty());
    }

    #[test]
    fn offline_tangle_fails() {
        let tangle = InMemoryTangle::new();
        tangle.set_online(false);
        assert!(matches!(
            tangle.attach(&address('A'), entry(b"x")),
            Err(ChainError::Transport(_))
        ));
        assert!(tangle.fetch(&address('A')).is_err());
        assert_eq!(tangle.entry_count(), 0);
    }
}
