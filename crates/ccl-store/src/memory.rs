use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// In-memory, `BTreeMap`-based record store.
///
/// Intended for tests, embedding, and the demo CLI. Keys are kept in
/// lexicographic order so range scans match a host ledger's native order.
/// Writes can be made to fail, per key or globally, to exercise partial
/// failure paths.
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
    rejected_keys: RwLock<HashSet<String>>,
    available: AtomicBool,
    writes: AtomicU64,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            rejected_keys: RwLock::new(HashSet::new()),
            available: AtomicBool::new(true),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful puts since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent put to `key` fail until [`Self::accept_writes_to`].
    pub fn reject_writes_to(&self, key: &str) {
        if let Ok(mut rejected) = self.rejected_keys.write() {
            rejected.insert(key.to_string());
        }
    }

    /// Undo [`Self::reject_writes_to`].
    pub fn accept_writes_to(&self, key: &str) {
        if let Ok(mut rejected) = self.rejected_keys.write() {
            rejected.remove(key);
        }
    }

    /// Toggle availability. An unavailable store fails every operation.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store switched off".into()))
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.ensure_available()?;
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(records.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.ensure_available()?;
        let rejected = self
            .rejected_keys
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?
            .contains(key);
        if rejected {
            tracing::debug!(key, "rejecting write");
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                reason: "key is write-protected".into(),
            });
        }

        let mut records = self
            .records
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        records.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn range(&self, start: &str, end: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        self.ensure_available()?;
        if start >= end {
            return Ok(vec![]);
        }
        let records = self
            .records
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(records
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .field("write_count", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{get_json, put_json};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u64,
    }

    #[test]
    fn put_and_get() {
        let store = InMemoryRecordStore::new();
        store.put("1", b"one").unwrap();
        assert_eq!(store.get("1").unwrap(), Some(b"one".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryRecordStore::new();
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn put_overwrites() {
        let store = InMemoryRecordStore::new();
        store.put("k", b"a").unwrap();
        store.put("k", b"b").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"b".to_vec()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn range_is_half_open_and_ordered() {
        let store = InMemoryRecordStore::new();
        for key in ["2", "10", "1", "999", "CHAIN_1", "Producer"] {
            store.put(key, key.as_bytes()).unwrap();
        }
        let keys: Vec<String> = store
            .range("0", "999")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["1", "10", "2"]);
    }

    #[test]
    fn empty_or_inverted_range_is_empty() {
        let store = InMemoryRecordStore::new();
        store.put("5", b"x").unwrap();
        assert!(store.range("5", "5").unwrap().is_empty());
        assert!(store.range("9", "0").unwrap().is_empty());
    }

    #[test]
    fn rejected_key_fails_without_effect() {
        let store = InMemoryRecordStore::new();
        store.put("WALLET", b"v1").unwrap();
        store.reject_writes_to("WALLET");

        let err = store.put("WALLET", b"v2").unwrap_err();
        assert!(matches!(err, StoreError::WriteRejected { .. }));
        assert_eq!(store.get("WALLET").unwrap(), Some(b"v1".to_vec()));

        store.accept_writes_to("WALLET");
        store.put("WALLET", b"v2").unwrap();
        assert_eq!(store.get("WALLET").unwrap(), Some(b"v2".to_vec()));
    }

    #[test]
    fn unavailable_store_fails_everything() {
        let store = InMemoryRecordStore::new();
        store.set_available(false);
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.put("k", b"v"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.range("0", "9"), Err(StoreError::Unavailable(_))));
        store.set_available(true);
        assert!(store.put("k", b"v").is_ok());
    }

    #[test]
    fn json_helpers_roundtrip_through_trait_object() {
        let store: Box<dyn RecordStore> = Box::new(InMemoryRecordStore::new());
        let sample = Sample {
            name: "Apples".into(),
            count: 3,
        };
        put_json(store.as_ref(), "1", &sample).unwrap();
        let read: Option<Sample> = get_json(store.as_ref(), "1").unwrap();
        assert_eq!(read, Some(sample));
    }

    #[test]
    fn json_helper_reports_corrupt_records() {
        let store = InMemoryRecordStore::new();
        store.put("1", b"not json").unwrap();
        let err = get_json::<Sample>(&store, "1").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn debug_format() {
        let store = InMemoryRecordStore::new();
        store.put("x", b"1").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryRecordStore"));
        assert!(debug.contains("record_count"));
    }
}
