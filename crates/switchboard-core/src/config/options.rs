//! Host options for a selection session (YAML)
//!
//! Read from `~/.config/switchboard/options.yaml` by default. Every field is
//! optional; a missing file means all defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selector::Environment;
use crate::storage::{create_key_value_store, user_config_dir, KeyValueStore};
use crate::types::default_models;

/// Errors that can occur while reading options
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown storage backend: {0}")]
    UnknownStorage(String),
}

pub type OptionsResult<T> = Result<T, OptionsError>;

/// Session options supplied by the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// Models the user may pick, in display order
    pub models: Vec<String>,
    /// Whether the runtime lacks the features session-based providers need
    pub restricted: bool,
    /// Registered storage backend name
    pub storage: String,
    /// Directory for the `file` backend (defaults to the user config dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            models: default_models(),
            restricted: false,
            storage: "file".to_string(),
            storage_dir: None,
        }
    }
}

impl SelectorOptions {
    /// Path of the user-level options file
    pub fn user_path() -> PathBuf {
        user_config_dir().join("options.yaml")
    }

    /// Load the user-level options file
    pub fn user() -> OptionsResult<Self> {
        Self::load(Self::user_path())
    }

    /// Load options from a YAML file, or defaults if the file does not exist
    pub fn load(path: impl AsRef<Path>) -> OptionsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse options from a YAML string
    pub fn from_yaml(content: &str) -> OptionsResult<Self> {
        // An empty document is valid and means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Environment signal for the session
    pub fn environment(&self) -> Environment {
        if self.restricted {
            Environment::Restricted
        } else {
            Environment::Standard
        }
    }

    /// Build the configured storage backend
    pub fn key_value_store(&self) -> OptionsResult<Arc<dyn KeyValueStore>> {
        create_key_value_store(&self.storage, self.storage_dir.as_deref())
            .ok_or_else(|| OptionsError::UnknownStorage(self.storage.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let options = SelectorOptions::load(dir.path().join("options.yaml")).unwrap();
        assert_eq!(options, SelectorOptions::default());
        assert_eq!(options.models[0], "gpt-3.5-turbo");
        assert_eq!(options.environment(), Environment::Standard);
    }

    #[test]
    fn test_partial_yaml() {
        let options = SelectorOptions::from_yaml("restricted: true\nmodels:\n  - gpt-4\n").unwrap();
        assert_eq!(options.models, vec!["gpt-4".to_string()]);
        assert_eq!(options.environment(), Environment::Restricted);
        assert_eq!(options.storage, "file");

        assert_eq!(SelectorOptions::from_yaml("").unwrap(), SelectorOptions::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.yaml");
        std::fs::write(&path, "storage: memory\n").unwrap();

        let options = SelectorOptions::load(&path).unwrap();
        assert_eq!(options.storage, "memory");
        assert_eq!(options.key_value_store().unwrap().name(), "memory");
    }

    #[test]
    fn test_file_storage_dir() {
        let dir = tempdir().unwrap();
        let options = SelectorOptions {
            storage_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(options.key_value_store().unwrap().name(), "file");
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            SelectorOptions::from_yaml("restricted: [1, 2]"),
            Err(OptionsError::Yaml(_))
        ));

        let options = SelectorOptions {
            storage: "cloud".to_string(),
            ..Default::default()
        };
        assert!(matches!(options.key_value_store(), Err(OptionsError::UnknownStorage(_))));
    }
}
