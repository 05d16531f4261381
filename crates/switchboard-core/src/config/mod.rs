//! Configuration persistence and host options
//!
//! - `ConfigStore`: Loads and saves the provider configuration record
//! - `SelectorOptions`: YAML options the host passes to a session

mod store;
mod options;

pub use store::{ConfigStore, PROVIDER_CONFIGS_KEY, normalize_api_host};
pub use options::{SelectorOptions, OptionsError, OptionsResult};
