use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::error::SpindleError;

/// Callback invoked for each inbound occurrence of a subscribed event.
pub type EventCallback = Arc<dyn Fn(Value) + Send + Sync>;

/// A duplex event channel to one remote peer.
///
/// The channel lives for the whole framework instance; reconnection, retry
/// and transport negotiation (persistent socket preferred, polling
/// fallback) are entirely the transport's concern and never surface here.
///
/// `emit` is fire-and-forget: no acknowledgment, no backpressure. Multiple
/// `on` callbacks for the same event all stack and fire in registration
/// order, one inbound delivery at a time, each run to completion.
pub trait Channel: Send + Sync {
    /// Send an event with its payload to the peer.
    fn emit(&self, event: &str, payload: Value);

    /// Register a callback for inbound occurrences of `event`. Callbacks
    /// accumulate; registering twice means both fire.
    fn on(&self, event: &str, callback: EventCallback);
}

/// Produces a [`Channel`] from an endpoint address.
pub trait Transport: Send + Sync {
    /// Connect to `url` and return the live channel.
    fn connect(&self, url: &str) -> Result<Arc<dyn Channel>, SpindleError>;
}

/// In-process channel for tests and headless demos.
///
/// Outbound emits are recorded and inspectable via
/// [`sent`](LoopbackChannel::sent); inbound events are injected with
/// [`deliver`](LoopbackChannel::deliver), which invokes every registered
/// callback for the event in order on the calling thread.
pub struct LoopbackChannel {
    url: String,
    sent: Mutex<Vec<(String, Value)>>,
    callbacks: RwLock<HashMap<String, Vec<EventCallback>>>,
}

impl LoopbackChannel {
    /// Create a channel "connected" to `url`.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            sent: Mutex::new(Vec::new()),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// The endpoint this channel was connected to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All emitted `(event, payload)` pairs, in send order.
    pub fn sent(&self) -> Vec<(String, Value)> {
        let sent = self.sent.lock().unwrap();
        sent.clone()
    }

    /// Inject an inbound event, invoking all callbacks registered for it.
    ///
    /// Callbacks run synchronously and to completion before this returns;
    /// deliveries are processed in call order.
    pub fn deliver(&self, event: &str, payload: Value) {
        let callbacks = {
            let map = self.callbacks.read().unwrap();
            map.get(event).cloned().unwrap_or_default()
        };
        for callback in callbacks {
            callback(payload.clone());
        }
    }
}

impl Channel for LoopbackChannel {
    fn emit(&self, event: &str, payload: Value) {
        let mut sent = self.sent.lock().unwrap();
        sent.push((event.to_string(), payload));
    }

    fn on(&self, event: &str, callback: EventCallback) {
        let mut map = self.callbacks.write().unwrap();
        map.entry(event.to_string()).or_default().push(callback);
        debug!(event, "channel callback registered");
    }
}

/// Transport producing [`LoopbackChannel`]s; keeps a handle to the last
/// connected channel so tests can drive it after construction.
pub struct LoopbackTransport {
    channel: RwLock<Option<Arc<LoopbackChannel>>>,
}

impl LoopbackTransport {
    /// Create a transport with no live channel yet.
    pub fn new() -> Self {
        Self {
            channel: RwLock::new(None),
        }
    }

    /// The channel created by the last `connect`, if any.
    pub fn channel(&self) -> Option<Arc<LoopbackChannel>> {
        let channel = self.channel.read().unwrap();
        channel.clone()
    }
}

impl Transport for LoopbackTransport {
    fn connect(&self, url: &str) -> Result<Arc<dyn Channel>, SpindleError> {
        let channel = Arc::new(LoopbackChannel::new(url));
        let mut slot = self.channel.write().unwrap();
        *slot = Some(channel.clone());
        debug!(url, "loopback channel connected");
        Ok(channel)
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}
