use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::{Map, Value};

/// Shared mutable application state: a flat key/value mapping.
///
/// One live instance is shared by reference (`Arc`) across every component
/// of a framework instance and mutated in place; it is never replaced
/// wholesale. Values are JSON values, matching the payload shape on the
/// wire.
///
/// Uses `BTreeMap` internally so [`keys`](StateStore::keys) and
/// [`snapshot`](StateStore::snapshot) come out in stable key order.
pub struct StateStore {
    values: RwLock<BTreeMap<String, Value>>,
}

impl StateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store seeded with the given entries.
    pub fn with_entries(entries: Map<String, Value>) -> Self {
        Self {
            values: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Set the value for a key, overwriting any previous value.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.into());
    }

    /// Get the current value for a key. Returns `None` if the key is unset.
    pub fn get(&self, key: &str) -> Option<Value> {
        let values = self.values.read().unwrap();
        values.get(key).cloned()
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        let values = self.values.read().unwrap();
        values.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap();
        values.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys currently stored, in order.
    pub fn keys(&self) -> Vec<String> {
        let values = self.values.read().unwrap();
        values.keys().cloned().collect()
    }

    /// Snapshot the whole store as a JSON object.
    ///
    /// Taken fresh on every call; rendering reads the store through this,
    /// never through a cached copy.
    pub fn snapshot(&self) -> Value {
        let values = self.values.read().unwrap();
        Value::Object(values.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
