use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use crate::error::SpindleError;
use crate::store::StateStore;

/// Ordered list of store keys auto-merged into outgoing event payloads.
///
/// Keys are validated against the store when registered, not when merged:
/// a key removed from the store afterwards simply merges as absent. The
/// list only grows, and duplicates are allowed (the merge is idempotent
/// per key, so a duplicate changes nothing).
pub struct PayloadComposer {
    keys: RwLock<Vec<String>>,
}

impl PayloadComposer {
    /// Create a composer with no registered keys.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(Vec::new()),
        }
    }

    /// Register a store key to merge into every outgoing payload.
    ///
    /// Fails if `key` is not currently present in the store; the keys list
    /// is left unchanged on failure.
    pub fn add_key(&self, store: &StateStore, key: &str) -> Result<(), SpindleError> {
        if !store.contains(key) {
            return Err(SpindleError::PayloadKey(key.to_string()));
        }
        let mut keys = self.keys.write().unwrap();
        keys.push(key.to_string());
        debug!(key, "payload key added");
        Ok(())
    }

    /// The registered keys, in registration order.
    pub fn keys(&self) -> Vec<String> {
        let keys = self.keys.read().unwrap();
        keys.clone()
    }

    /// Merge store-derived values into `explicit`.
    ///
    /// For every registered key absent from `explicit`, the store's current
    /// value is filled in; keys already present are left untouched. Explicit
    /// data always wins. Non-object payloads pass through unchanged — the
    /// merge is only defined over mappings. The store is never mutated.
    pub fn compose(&self, store: &StateStore, explicit: Value) -> Value {
        let mut data = match explicit {
            Value::Object(data) => data,
            other => return other,
        };
        let keys = self.keys.read().unwrap();
        for key in keys.iter() {
            if !data.contains_key(key) {
                if let Some(value) = store.get(key) {
                    data.insert(key.clone(), value);
                }
            }
        }
        Value::Object(data)
    }
}

impl Default for PayloadComposer {
    fn default() -> Self {
        Self::new()
    }
}
