//! Provider selection editing session
//!
//! A `ProviderSelector` owns one editing session: it loads the persisted
//! record once, keeps the user's edits in a staged copy, validates on save and
//! hands the result to the `ConfigStore`. Nothing is written until `save`.
//!
//! ```text
//! Initializing ──load ok──▶ Ready ◀──────────────┐
//!      │                    │  ▲ (edits)         │
//!      └─load err─▶ LoadFailed  save             │
//!                           ▼                    │
//!                       Validating ──invalid─────┤
//!                           │ valid              │
//!                           ▼                    │
//!                         Saving ──ok / err──────┘
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigStore, OptionsResult, SelectorOptions};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{ProviderConfigs, ProviderParams, ProviderType};
use crate::{log_debug, log_error, log_info, log_warn};

use super::environment::Environment;
use super::validation::{validate, ValidationError};

/// Provider whose params the edit form holds. The form is seeded from this
/// entry and saved back to it, whichever provider is active.
const FORM_PROVIDER: ProviderType = ProviderType::OfficialApi;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the initial load
    Initializing,
    /// Editable
    Ready,
    /// The initial load failed; the session cannot continue
    LoadFailed(String),
    /// A save request is being validated
    Validating,
    /// A validated save is being persisted
    Saving,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Initializing => write!(f, "initializing"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::LoadFailed(_) => write!(f, "load failed"),
            SessionState::Validating => write!(f, "validating"),
            SessionState::Saving => write!(f, "saving"),
        }
    }
}

/// Result of a save attempt, for the host to turn into a user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was written
    Saved,
    /// Nothing was written; the staged edits need fixing
    ValidationFailed(ValidationError),
    /// Validation passed but the backend failed; retrying is safe
    StorageFailed(String),
}

impl SaveOutcome {
    /// Whether the record was written
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Misuse of a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to load provider configs: {0}")]
    LoadFailed(String),

    #[error("Session is not ready (state: {0})")]
    NotReady(SessionState),

    #[error("Session was already initialized (state: {0})")]
    NotInitializing(SessionState),

    #[error("Provider {0} is not available in this environment")]
    ProviderUnavailable(ProviderType),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The candidate configuration being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEdit {
    /// Provider that becomes active on save
    pub provider: ProviderType,
    /// Field values of the edit form
    pub params: ProviderParams,
}

/// One provider selection editing session
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use switchboard_core::config::ConfigStore;
/// use switchboard_core::selector::{Environment, ProviderSelector, SaveOutcome};
/// use switchboard_core::storage::MemoryKeyValueStore;
/// use switchboard_core::types::default_models;
///
/// # async fn demo() -> switchboard_core::selector::SessionResult<()> {
/// let store = Arc::new(ConfigStore::new(Arc::new(MemoryKeyValueStore::new())));
/// let mut session = ProviderSelector::open(store, default_models(), Environment::Standard).await?;
///
/// session.set_api_key("sk-test")?;
/// assert_eq!(session.save().await?, SaveOutcome::Saved);
/// # Ok(())
/// # }
/// ```
pub struct ProviderSelector {
    store: Arc<ConfigStore>,
    models: Vec<String>,
    environment: Environment,
    state: SessionState,
    persisted: Option<ProviderConfigs>,
    staged: StagedEdit,
    logger: SharedLogger,
}

impl ProviderSelector {
    /// Create a session in the `Initializing` state
    pub fn new(store: Arc<ConfigStore>, models: Vec<String>, environment: Environment) -> Self {
        let staged = StagedEdit {
            provider: environment.initial_provider(ProviderType::OfficialApi),
            params: Self::seed_params(None, &models),
        };
        Self {
            store,
            models,
            environment,
            state: SessionState::Initializing,
            persisted: None,
            staged,
            logger: NoOpLogger::shared(),
        }
    }

    /// Create a session from host options, with the configured backend
    pub fn from_options(options: &SelectorOptions) -> OptionsResult<Self> {
        let store = ConfigStore::new(options.key_value_store()?);
        Ok(Self::new(Arc::new(store), options.models.clone(), options.environment()))
    }

    /// Create and initialize a session
    pub async fn open(store: Arc<ConfigStore>, models: Vec<String>, environment: Environment) -> SessionResult<Self> {
        let mut session = Self::new(store, models, environment);
        session.initialize().await?;
        Ok(session)
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Load the persisted record and seed the staged edit from it.
    ///
    /// On failure the session moves to `LoadFailed` for good; the host has to
    /// start a new session to retry.
    pub async fn initialize(&mut self) -> SessionResult<()> {
        if self.state != SessionState::Initializing {
            return Err(SessionError::NotInitializing(self.state.clone()));
        }

        match self.store.load().await {
            Ok(record) => {
                let provider = self.environment.initial_provider(record.provider);
                if provider != record.provider {
                    log_info!(
                        self.logger,
                        "Provider {} is unavailable here, starting on {}",
                        record.provider,
                        provider
                    );
                }
                self.staged = StagedEdit {
                    provider,
                    params: Self::seed_params(Some(&record), &self.models),
                };
                self.persisted = Some(record);
                self.state = SessionState::Ready;
                log_debug!(self.logger, "Session ready, active provider {}", provider);
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                log_error!(self.logger, "Session failed to load: {}", message);
                self.state = SessionState::LoadFailed(message.clone());
                Err(SessionError::LoadFailed(message))
            }
        }
    }

    /// Initial form values.
    ///
    /// Always taken from the `OfficialApi` entry, whichever provider is
    /// active, because the form only edits that provider's fields.
    fn seed_params(record: Option<&ProviderConfigs>, models: &[String]) -> ProviderParams {
        match record.and_then(|r| r.params(FORM_PROVIDER)) {
            Some(params) => params.clone(),
            None => ProviderParams {
                model: models.first().cloned().unwrap_or_default(),
                ..ProviderParams::default()
            },
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether the session accepts edits and saves
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Environment the session was created for
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Allowed models, in display order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Providers the user may choose in this environment
    pub fn selectable_providers(&self) -> Vec<ProviderType> {
        self.environment.selectable_providers()
    }

    /// Provider that becomes active on save
    pub fn active_provider(&self) -> ProviderType {
        self.staged.provider
    }

    /// The staged edit
    pub fn staged(&self) -> &StagedEdit {
        &self.staged
    }

    /// Record as last loaded or saved by this session
    pub fn persisted(&self) -> Option<&ProviderConfigs> {
        self.persisted.as_ref()
    }

    fn ensure_ready(&self) -> SessionResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(SessionError::NotReady(self.state.clone()))
        }
    }

    /// Choose the provider to activate on save
    pub fn select_provider(&mut self, provider: ProviderType) -> SessionResult<()> {
        self.ensure_ready()?;
        if !self.environment.allows(provider) {
            return Err(SessionError::ProviderUnavailable(provider));
        }
        self.staged.provider = provider;
        Ok(())
    }

    /// Set the API key field
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> SessionResult<()> {
        self.ensure_ready()?;
        self.staged.params.api_key = api_key.into();
        Ok(())
    }

    /// Set the API host field. The scheme is stripped on save, not here.
    pub fn set_api_host(&mut self, api_host: impl Into<String>) -> SessionResult<()> {
        self.ensure_ready()?;
        self.staged.params.api_host = api_host.into();
        Ok(())
    }

    /// Set the API path field
    pub fn set_api_path(&mut self, api_path: impl Into<String>) -> SessionResult<()> {
        self.ensure_ready()?;
        self.staged.params.api_path = api_path.into();
        Ok(())
    }

    /// Pick a model. Membership in the allowed list is checked on save.
    pub fn set_model(&mut self, model: impl Into<String>) -> SessionResult<()> {
        self.ensure_ready()?;
        self.staged.params.model = model.into();
        Ok(())
    }

    /// Validate the staged edit without saving
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self.staged.provider, &self.staged.params, &self.models)
    }

    /// Validate and persist the staged edit.
    ///
    /// The form values go to the `OfficialApi` entry and the selected
    /// provider becomes active; other entries are left alone.
    /// Validation and storage failures are reported through `SaveOutcome`
    /// and leave the staged edit untouched, so the user can fix or retry.
    /// If the returned future is dropped while saving, the session stays in
    /// `Saving` and should be discarded.
    pub async fn save(&mut self) -> SessionResult<SaveOutcome> {
        self.ensure_ready()?;

        self.state = SessionState::Validating;
        if let Err(e) = self.validate() {
            log_warn!(self.logger, "Not saving provider configs: {}", e.reason());
            self.state = SessionState::Ready;
            return Ok(SaveOutcome::ValidationFailed(e));
        }

        self.state = SessionState::Saving;
        let provider = self.staged.provider;
        let params = self.staged.params.clone();
        let outcome = match self.store.save_as(provider, FORM_PROVIDER, params).await {
            Ok(record) => {
                log_info!(self.logger, "Provider {} saved", provider);
                self.persisted = Some(record);
                SaveOutcome::Saved
            }
            Err(e) => {
                log_error!(self.logger, "Failed to save provider {}: {}", provider, e);
                SaveOutcome::StorageFailed(e.to_string())
            }
        };
        self.state = SessionState::Ready;
        Ok(outcome)
    }
}

impl std::fmt::Debug for ProviderSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSelector")
            .field("state", &self.state)
            .field("environment", &self.environment)
            .field("provider", &self.staged.provider)
            .field("models", &self.models)
            .finish()
    }
}
