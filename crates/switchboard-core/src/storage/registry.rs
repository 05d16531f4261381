//! Registry for creating key-value stores by name

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::file::FileKeyValueStore;
use super::memory::MemoryKeyValueStore;
use super::traits::KeyValueStore;

/// Factory function type for creating stores.
/// The argument is an optional location override (a directory for `file`).
pub type StoreFactory = Box<dyn Fn(Option<&Path>) -> Arc<dyn KeyValueStore> + Send + Sync>;

/// Definition of a registered store backend
pub struct StoreDefinition {
    /// Unique name for this backend
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: StoreFactory,
}

impl std::fmt::Debug for StoreDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

static REGISTRY: Lazy<RwLock<HashMap<String, StoreDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "memory".to_string(),
        StoreDefinition {
            name: "memory".to_string(),
            description: "In-memory storage, lost on exit".to_string(),
            factory: Box::new(|_| Arc::new(MemoryKeyValueStore::new())),
        },
    );

    map.insert(
        "file".to_string(),
        StoreDefinition {
            name: "file".to_string(),
            description: "JSON files under the user config directory".to_string(),
            factory: Box::new(|dir| match dir {
                Some(dir) => Arc::new(FileKeyValueStore::new(dir)),
                None => Arc::new(FileKeyValueStore::user()),
            }),
        },
    );

    RwLock::new(map)
});

/// Register a store backend, replacing any backend with the same name
///
/// # Example
///
/// ```
/// use switchboard_core::storage::{register_key_value_store, MemoryKeyValueStore};
/// use std::sync::Arc;
///
/// register_key_value_store(
///     "scratch",
///     "Throwaway store",
///     Box::new(|_| Arc::new(MemoryKeyValueStore::new())),
/// );
/// ```
pub fn register_key_value_store(name: &str, description: &str, factory: StoreFactory) {
    REGISTRY.write().insert(
        name.to_string(),
        StoreDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a store by backend name, or `None` if the name is not registered
pub fn create_key_value_store(name: &str, location: Option<&Path>) -> Option<Arc<dyn KeyValueStore>> {
    let registry = REGISTRY.read();
    registry.get(name).map(|def| (def.factory)(location))
}

/// List registered backends as (name, description) pairs, sorted by name
pub fn list_key_value_stores() -> Vec<(String, String)> {
    let registry = REGISTRY.read();
    let mut stores: Vec<_> = registry
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    stores.sort();
    stores
}

/// Check if a backend is registered
pub fn has_key_value_store(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Unregister a backend (mainly for testing)
pub fn unregister_key_value_store(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}
