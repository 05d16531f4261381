//! Core types for provider selection
//!
//! This module contains the provider tags and the persisted configuration record.

mod provider;
mod params;

pub use provider::{ProviderType, ProviderMetadata, DEFAULT_MODELS, default_models};
pub use params::{ProviderParams, ProviderConfigs};
