//! In-memory key-value store

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{KeyValueStore, StorageError, StorageResult};

/// In-memory key-value store for testing and ephemeral use
///
/// Values are lost when the store is dropped. The store can be switched to
/// "unavailable", after which every read and write fails with
/// `StorageError::Unavailable`; this stands in for an unreachable backend.
///
/// # Example
///
/// ```
/// use switchboard_core::storage::MemoryKeyValueStore;
///
/// let store = MemoryKeyValueStore::new();
/// store.set_sync("provider-configs", "{}");
/// assert_eq!(store.get_sync("provider-configs"), Some(b"{}".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl MemoryKeyValueStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory store with initial values
    pub fn with_entries(initial: HashMap<String, Vec<u8>>) -> Self {
        Self {
            entries: RwLock::new(initial),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Whether calls currently fail
    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }

    /// Read a value without going through the async trait
    pub fn get_sync(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    /// Write a value without going through the async trait
    pub fn set_sync(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.entries.write().insert(key.to_string(), value.into());
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.is_unavailable() {
            Err(StorageError::Unavailable(self.name().to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self.get_sync(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        self.check_available()?;
        self.set_sync(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_get_set() {
        let store = MemoryKeyValueStore::new();

        // Initially empty
        assert!(store.is_empty());
        assert_eq!(store.get("record").await.unwrap(), None);

        store.set("record", b"one".to_vec()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("record").await.unwrap(), Some(b"one".to_vec()));

        // Overwrite
        store.set("record", b"two".to_vec()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_sync("record"), Some(b"two".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_store_unavailable() {
        let store = MemoryKeyValueStore::new();
        store.set_sync("record", "kept");
        store.set_unavailable(true);

        assert!(matches!(store.get("record").await, Err(StorageError::Unavailable(_))));
        assert!(matches!(
            store.set("record", b"lost".to_vec()).await,
            Err(StorageError::Unavailable(_))
        ));

        // The failed write did not touch the value
        store.set_unavailable(false);
        assert_eq!(store.get("record").await.unwrap(), Some(b"kept".to_vec()));
    }

    #[test]
    fn test_memory_store_with_entries() {
        let mut initial = HashMap::new();
        initial.insert("a".to_string(), b"1".to_vec());
        initial.insert("b".to_string(), b"2".to_vec());

        let store = MemoryKeyValueStore::with_entries(initial);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_sync("b"), Some(b"2".to_vec()));
    }
}
