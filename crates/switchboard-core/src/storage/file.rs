//! File-based key-value store
//!
//! Each key is one file inside a directory (by default `~/.config/switchboard/`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::traits::{KeyValueStore, StorageError, StorageResult};

/// File-based key-value store
///
/// A missing file reads as a missing key. Writes go to a temporary sibling
/// file first and are renamed into place, so a crash mid-write never leaves a
/// truncated record behind.
///
/// # Example
///
/// ```no_run
/// use switchboard_core::storage::FileKeyValueStore;
///
/// // ~/.config/switchboard
/// let user_store = FileKeyValueStore::user();
///
/// // Explicit directory
/// let store = FileKeyValueStore::new("/tmp/switchboard");
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the user config directory (`~/.config/switchboard`)
    pub fn user() -> Self {
        Self::new(user_config_dir())
    }

    /// Directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Other(format!("Invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// `<config_dir>/switchboard`, falling back to `~/.config/switchboard`
pub fn user_config_dir() -> PathBuf {
    // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join("switchboard")
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &value).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StorageError::Io(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        // Missing directory reads as empty
        assert_eq!(store.get("provider-configs").await.unwrap(), None);

        store.set("provider-configs", b"{\"a\":1}".to_vec()).await.unwrap();
        assert!(dir.path().join("nested").join("provider-configs.json").exists());
        assert!(!dir.path().join("nested").join("provider-configs.json.tmp").exists());

        // A second instance sees the same data
        let other = FileKeyValueStore::new(dir.path().join("nested"));
        assert_eq!(
            other.get("provider-configs").await.unwrap(),
            Some(b"{\"a\":1}".to_vec())
        );
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        // A non-empty directory where the record file should go makes the rename fail
        let blocker = dir.path().join("provider-configs.json");
        std::fs::create_dir(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        assert!(matches!(
            store.set("provider-configs", b"{}".to_vec()).await,
            Err(StorageError::Io(_))
        ));
        assert!(!dir.path().join("provider-configs.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert!(matches!(store.get("../escape").await, Err(StorageError::Other(_))));
        assert!(matches!(store.set("", Vec::new()).await, Err(StorageError::Other(_))));
        assert!(store.path_for(".hidden").is_err());
        assert!(store.path_for("provider_configs.v2").is_ok());
    }

    #[test]
    fn test_user_dir() {
        let store = FileKeyValueStore::user();
        assert!(store.dir().ends_with("switchboard"));
    }
}
