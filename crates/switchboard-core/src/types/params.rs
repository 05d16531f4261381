//! Per-provider settings and the persisted aggregate

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::provider::ProviderType;

/// Connection parameters for one provider
///
/// Empty strings mean "not set"; an empty host or path makes the HTTP layer
/// fall back to the provider default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderParams {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// API key for authentication
    pub api_key: String,
    /// API host without a protocol scheme (e.g. `api.openai.com`)
    pub api_host: String,
    /// Request path (e.g. `/v1/chat/completions`)
    pub api_path: String,
}

impl ProviderParams {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the API host
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set the API path
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }
}

/// The single persisted configuration record
///
/// `configs` keeps entries for every provider that was ever saved, not just
/// the active one, so switching back restores the earlier values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfigs {
    /// Active provider
    pub provider: ProviderType,
    /// Saved params keyed by provider
    #[serde(default)]
    pub configs: BTreeMap<ProviderType, ProviderParams>,
}

impl Default for ProviderConfigs {
    fn default() -> Self {
        Self {
            provider: ProviderType::OfficialApi,
            configs: BTreeMap::new(),
        }
    }
}

impl ProviderConfigs {
    /// Create a record with the given active provider and no saved params
    pub fn new(provider: ProviderType) -> Self {
        Self {
            provider,
            configs: BTreeMap::new(),
        }
    }

    /// Add saved params for a provider
    pub fn with_params(mut self, provider: ProviderType, params: ProviderParams) -> Self {
        self.configs.insert(provider, params);
        self
    }

    /// Saved params for a provider, if any
    pub fn params(&self, provider: ProviderType) -> Option<&ProviderParams> {
        self.configs.get(&provider)
    }

    /// Overwrite the `entry` provider's params and make `active` the active
    /// provider. Entries of other providers are left as they are.
    pub fn merge(&mut self, active: ProviderType, entry: ProviderType, params: ProviderParams) {
        self.configs.insert(entry, params);
        self.provider = active;
    }
}
