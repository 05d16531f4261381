//! Storage backends for the configuration record
//!
//! This module provides a pluggable key-value boundary with:
//! - `KeyValueStore` trait for implementing custom backends
//! - Built-in implementations: `MemoryKeyValueStore`, `FileKeyValueStore`
//! - A registry for creating backends by name

mod traits;
mod memory;
mod file;
mod registry;

pub use traits::{KeyValueStore, StorageError, StorageResult};
pub use memory::MemoryKeyValueStore;
pub use file::{FileKeyValueStore, user_config_dir};
pub use registry::{
    register_key_value_store, create_key_value_store, list_key_value_stores,
    has_key_value_store, unregister_key_value_store, StoreDefinition, StoreFactory,
};
