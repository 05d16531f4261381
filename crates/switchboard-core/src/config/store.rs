//! Persistence of the provider configuration record
//!
//! The whole record lives under one well-known key as JSON. Reads never fail
//! for a missing record; writes merge one provider's params into whatever is
//! currently stored.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::logging::{NoOpLogger, SharedLogger};
use crate::storage::{KeyValueStore, StorageResult};
use crate::types::{ProviderConfigs, ProviderParams, ProviderType};
use crate::{log_debug, log_error, log_info};

/// Storage key of the configuration record
pub const PROVIDER_CONFIGS_KEY: &str = "provider-configs";

/// Remove one leading `https://` or `http://` from a host.
///
/// Matching is case-sensitive and only at the start of the string.
pub fn normalize_api_host(host: &str) -> String {
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
        .to_string()
}

/// Reads and writes the provider configuration record
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use switchboard_core::config::ConfigStore;
/// use switchboard_core::storage::MemoryKeyValueStore;
/// use switchboard_core::types::{ProviderParams, ProviderType};
///
/// # async fn demo() -> switchboard_core::storage::StorageResult<()> {
/// let store = ConfigStore::new(Arc::new(MemoryKeyValueStore::new()));
/// store.save(
///     ProviderType::OfficialApi,
///     ProviderParams::new().with_api_key("sk-test").with_api_host("https://api.openai.com"),
/// ).await?;
///
/// let record = store.load().await?;
/// assert_eq!(record.params(ProviderType::OfficialApi).unwrap().api_host, "api.openai.com");
/// # Ok(())
/// # }
/// ```
pub struct ConfigStore {
    backend: Arc<dyn KeyValueStore>,
    logger: SharedLogger,
    // Spans the read-modify-write in `save`, so overlapping saves queue.
    write_lock: Mutex<()>,
}

impl ConfigStore {
    /// Create a config store on top of a key-value backend
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            logger: NoOpLogger::shared(),
            write_lock: Mutex::new(()),
        }
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Name of the underlying backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Load the persisted record, or the default record if none was saved yet
    pub async fn load(&self) -> StorageResult<ProviderConfigs> {
        let bytes = self.backend.get(PROVIDER_CONFIGS_KEY).await.map_err(|e| {
            log_error!(self.logger, "Failed to read provider configs from {}: {}", self.backend.name(), e);
            e
        })?;

        let Some(bytes) = bytes else {
            log_debug!(self.logger, "No provider configs stored, using defaults");
            return Ok(ProviderConfigs::default());
        };

        let record: ProviderConfigs = serde_json::from_slice(&bytes).map_err(|e| {
            log_error!(self.logger, "Stored provider configs are unreadable: {}", e);
            e
        })?;

        log_debug!(
            self.logger,
            "Loaded provider configs: active={}, entries={}",
            record.provider,
            record.configs.len()
        );
        Ok(record)
    }

    /// Persist `params` for `provider` and make it the active provider.
    ///
    /// The host is normalized first. Only the `provider` entry of the stored
    /// map is replaced; entries of other providers are kept.
    pub async fn save(&self, provider: ProviderType, params: ProviderParams) -> StorageResult<ProviderConfigs> {
        self.save_as(provider, provider, params).await
    }

    /// Persist `params` under the `entry` key and make `active` the active
    /// provider. The two differ when a form that edits one provider's fields
    /// is saved while another provider is selected.
    ///
    /// Normalization and merging are the same as in `save`.
    pub async fn save_as(
        &self,
        active: ProviderType,
        entry: ProviderType,
        mut params: ProviderParams,
    ) -> StorageResult<ProviderConfigs> {
        params.api_host = normalize_api_host(&params.api_host);

        let _guard = self.write_lock.lock().await;

        let mut record = self.load().await?;
        record.merge(active, entry, params);

        let bytes = serde_json::to_vec(&record)?;
        self.backend.set(PROVIDER_CONFIGS_KEY, bytes).await.map_err(|e| {
            log_error!(self.logger, "Failed to write provider configs to {}: {}", self.backend.name(), e);
            e
        })?;

        log_info!(self.logger, "Saved provider configs: active={}, entry={}", active, entry);
        Ok(record)
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}
