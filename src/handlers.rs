use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::error::SpindleError;

/// A locally registered callback, invoked on explicit host request.
pub type Handler = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Named local callbacks the host invokes explicitly via [`run`].
///
/// Registration overwrites: the last handler registered under a name wins.
/// This is deliberately different from inbound event bindings, which stack
/// (see [`Spindle::on`](crate::Spindle::on)).
///
/// [`run`]: HandlerRegistry::run
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler under `name`, replacing any previous one.
    pub fn add<F>(&self, name: &str, handler: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().unwrap();
        handlers.insert(name.to_string(), Arc::new(handler));
        debug!(name, "handler added");
    }

    /// Invoke the handler registered under `name` with `data`, returning
    /// its result. Never emits or renders on its own.
    pub fn run(&self, name: &str, data: Value) -> Result<Value, SpindleError> {
        let handler = {
            let handlers = self.handlers.read().unwrap();
            handlers
                .get(name)
                .cloned()
                .ok_or_else(|| SpindleError::UnknownHandler(name.to_string()))?
        };
        debug!(name, "handler running");
        Ok(handler(data))
    }

    /// Check whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        let handlers = self.handlers.read().unwrap();
        handlers.contains_key(name)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
