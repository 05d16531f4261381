//! Key-value storage trait and errors

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store not available: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Other(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Asynchronous key-value storage
///
/// Implementations:
/// - `MemoryKeyValueStore`: In-memory, for testing and ephemeral sessions
/// - `FileKeyValueStore`: One file per key under a directory
/// - Host adapters: browser extension storage, app settings tables, etc.
///
/// Values are opaque bytes; callers own the encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Read a value. `Ok(None)` means the key was never written.
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()>;
}
