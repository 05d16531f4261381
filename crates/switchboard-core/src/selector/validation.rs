//! Pre-save validation of staged params

use thiserror::Error;

use crate::types::{ProviderParams, ProviderType};

/// Why a staged configuration cannot be saved
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your API key")]
    MissingApiKey,

    #[error("Please select a valid model")]
    InvalidModel,
}

impl ValidationError {
    /// Stable machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingApiKey => "missing_api_key",
            ValidationError::InvalidModel => "invalid_model",
        }
    }
}

/// Check `params` for `provider` against the allowed model list.
///
/// The credential is checked before the model. Host and path are never
/// required; empty means "provider default".
pub fn validate(provider: ProviderType, params: &ProviderParams, models: &[String]) -> Result<(), ValidationError> {
    if provider.requires_credential() && params.api_key.is_empty() {
        return Err(ValidationError::MissingApiKey);
    }

    if provider.requires_model()
        && (params.model.is_empty() || !models.iter().any(|m| *m == params.model))
    {
        return Err(ValidationError::InvalidModel);
    }

    Ok(())
}
