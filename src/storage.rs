//! # Persistent Key-Value Store
//!
//! The chosen multiplier factor survives navigation by being persisted in
//! a key-value store keyed by page identity. The store surface is the
//! classic get/set/remove triple; the crate ships a thread-safe in-memory
//! implementation, and hosts with a real persistence layer implement the
//! trait themselves.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Synchronous string key-value store, one value per page key
pub trait KeyValueStore {
    /// Get a stored value; `None` when absent
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one
    fn set(&self, key: &str, value: &str);

    /// Remove a stored value if present
    fn remove(&self, key: &str);
}

/// Thread-safe in-memory store implementation
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let value = self.data.read().get(key).cloned();
        trace!("store get '{}' -> {:?}", key, value);
        value
    }

    fn set(&self, key: &str, value: &str) {
        trace!("store set '{}' = '{}'", key, value);
        self.data.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        trace!("store remove '{}'", key);
        self.data.write().remove(key);
    }
}
