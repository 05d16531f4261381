//! Switchboard Core
//!
//! Runtime-agnostic provider selection and configuration persistence.
//! This crate decides which completion backend an application uses (a hosted
//! chat web-app session or the directly-keyed official API) and stores that
//! choice together with each provider's connection parameters.
//!
//! ## Editing session
//!
//! ```rust,ignore
//! use switchboard_core::{ConfigStore, Environment, ProviderSelector, SaveOutcome};
//!
//! let store = Arc::new(ConfigStore::new(backend));
//! let mut session = ProviderSelector::open(store, models, Environment::Standard).await?;
//!
//! session.set_api_key("sk-...")?;
//! session.set_api_host("https://api.openai.com")?; // stored as "api.openai.com"
//!
//! match session.save().await? {
//!     SaveOutcome::Saved => show("Changes saved"),
//!     SaveOutcome::ValidationFailed(e) => show(&e.to_string()),
//!     SaveOutcome::StorageFailed(msg) => show(&msg),
//! }
//! ```

pub mod types;
pub mod storage;
pub mod logging;
pub mod config;
pub mod selector;

// Re-export commonly used types
pub use types::{
    ProviderType, ProviderMetadata, ProviderParams, ProviderConfigs,
    DEFAULT_MODELS, default_models,
};

pub use storage::{
    KeyValueStore, StorageError, StorageResult,
    MemoryKeyValueStore, FileKeyValueStore,
    register_key_value_store, create_key_value_store, list_key_value_stores,
};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, MemoryLogger, SharedLogger};

pub use config::{ConfigStore, PROVIDER_CONFIGS_KEY, normalize_api_host, SelectorOptions, OptionsError};

pub use selector::{
    ProviderSelector, SessionState, SessionError, SessionResult, SaveOutcome, StagedEdit,
    Environment, ValidationError, validate,
};
