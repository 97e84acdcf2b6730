use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Ordered key-value record store supplied by the host ledger.
///
/// All implementations must satisfy these invariants:
/// - `put` replaces the whole value for a key or fails without effect.
/// - `range` yields keys in `[start, end)` in lexicographic order.
/// - The store never interprets record contents.
/// - The host serializes transactions, so implementations need no
///   cross-key atomicity.
pub trait RecordStore: Send + Sync {
    /// Read a record by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create or replace the record at `key`.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Scan all records with `start <= key < end`, in key order.
    fn range(&self, start: &str, end: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;
}

/// Read and decode a JSON record from any store, including trait objects.
pub fn get_json<T: DeserializeOwned>(
    store: &(impl RecordStore + ?Sized),
    key: &str,
) -> StoreResult<Option<T>> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Serialization(format!("{key}: {e}")))
}

/// Encode and write a JSON record to any store, including trait objects.
pub fn put_json<T: Serialize>(
    store: &(impl RecordStore + ?Sized),
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let bytes =
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(format!("{key}: {e}")))?;
    store.put(key, &bytes)
}
