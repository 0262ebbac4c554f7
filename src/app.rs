use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::channel::{Channel, EventCallback, Transport};
use crate::document::Document;
use crate::error::SpindleError;
use crate::handlers::HandlerRegistry;
use crate::pages::PageRegistry;
use crate::payload::PayloadComposer;
use crate::render::Renderer;
use crate::store::StateStore;
use crate::template::TemplateEngine;

/// The framework facade: one store, one document container, one channel.
///
/// Constructed through [`Spindle::builder`]. The host declares pages and
/// the endpoint URL up front, then drives everything through the runtime
/// surface:
///
/// - [`render`](Spindle::render) / [`go`](Spindle::go) — view updates
/// - [`add_handler`](Spindle::add_handler) / [`run`](Spindle::run) — local
///   callbacks, invoked explicitly
/// - [`add_payload_key`](Spindle::add_payload_key) /
///   [`emit`](Spindle::emit) — outbound events with store-derived payloads
/// - [`on`](Spindle::on) — inbound event bindings (callback and/or render)
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use spindle::{LoopbackTransport, MemoryDocument, PlaceholderEngine, Spindle};
///
/// let document = Arc::new(MemoryDocument::new());
/// document.insert("#app", "");
/// document.insert("#home", "<p>count: {{count}}</p>");
///
/// let app = Spindle::builder()
///     .state("count", json!(0))
///     .container("#app")
///     .page("home")
///     .url("memory://peer")
///     .engine(Arc::new(PlaceholderEngine))
///     .document(document)
///     .transport(Arc::new(LoopbackTransport::new()))
///     .build()
///     .unwrap();
///
/// app.go("home");
/// ```
pub struct Spindle {
    store: Arc<StateStore>,
    renderer: Arc<Renderer>,
    pages: PageRegistry,
    payload: PayloadComposer,
    handlers: HandlerRegistry,
    channel: Arc<dyn Channel>,
}

impl std::fmt::Debug for Spindle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spindle").finish_non_exhaustive()
    }
}

impl Spindle {
    /// Start building a framework instance.
    pub fn builder() -> SpindleBuilder {
        SpindleBuilder::new()
    }

    // ====================================================================
    // State
    // ====================================================================

    /// The shared state store. Host code and inbound-event callbacks
    /// mutate application state through this.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    // ====================================================================
    // Rendering and navigation
    // ====================================================================

    /// Render a template into a mount point (default container when
    /// `None`). Best-effort: failures are logged, never returned.
    pub fn render(&self, template: &str, container: Option<&str>) {
        self.renderer.render(template, container);
    }

    /// Transition to a page, rendering `"#" + page` into the default
    /// container when the page is declared.
    pub fn go(&self, page: &str) {
        self.pages.go(page, &self.renderer);
    }

    /// The page most recently transitioned to, declared or not.
    pub fn current_page(&self) -> Option<String> {
        self.pages.current()
    }

    // ====================================================================
    // Outbound events
    // ====================================================================

    /// Register a store key to auto-merge into every outgoing payload.
    /// Fails if the key is not currently in the store.
    pub fn add_payload_key(&self, key: &str) -> Result<(), SpindleError> {
        self.payload.add_key(&self.store, key)
    }

    /// Emit an event to the peer. `data` defaults to an empty object;
    /// registered payload keys fill gaps, explicit entries always win.
    /// Fire-and-forget.
    pub fn emit(&self, event: &str, data: Option<Value>) {
        let payload = self
            .payload
            .compose(&self.store, data.unwrap_or_else(|| json!({})));
        self.channel.emit(event, payload);
        debug!(event, "socket event emitted");
    }

    // ====================================================================
    // Local handlers
    // ====================================================================

    /// Register a named local callback, replacing any previous one.
    pub fn add_handler<F>(&self, name: &str, handler: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.handlers.add(name, handler);
    }

    /// Invoke a registered handler with `data` and return its result.
    pub fn run(&self, name: &str, data: Value) -> Result<Value, SpindleError> {
        self.handlers.run(name, data)
    }

    // ====================================================================
    // Inbound events
    // ====================================================================

    /// Bind an inbound event to an optional callback and/or an optional
    /// render.
    ///
    /// On each inbound occurrence of `event`: receipt is logged, the
    /// callback (if any) runs first with the payload — typically mutating
    /// the store — then `render_target` (if any) is rendered into `mount`
    /// (default container when `None`), so the view reflects the mutation.
    ///
    /// Bindings stack: registering the same event twice means both fire,
    /// in registration order. This is the opposite of
    /// [`add_handler`](Spindle::add_handler)'s overwrite semantics, and
    /// both are load-bearing.
    pub fn on(
        &self,
        event: &str,
        render_target: Option<&str>,
        callback: Option<EventCallback>,
        mount: Option<&str>,
    ) {
        let event_name = event.to_string();
        let render_target = render_target.map(str::to_string);
        let mount = mount.map(str::to_string);
        let renderer = self.renderer.clone();

        self.channel.on(
            event,
            Arc::new(move |payload: Value| {
                debug!(event = %event_name, "socket event received");
                if let Some(callback) = &callback {
                    callback(payload);
                }
                if let Some(target) = &render_target {
                    renderer.render(target, mount.as_deref());
                }
            }),
        );
    }
}

/// Builder for [`Spindle`].
///
/// The four config keys (`store`, `container`, `pages`, `url`) and the
/// three collaborators (engine, document, transport) are all required;
/// [`build`](SpindleBuilder::build) fails with
/// [`SpindleError::MissingDependency`] naming whichever is absent.
pub struct SpindleBuilder {
    state: Vec<(String, Value)>,
    container: Option<String>,
    pages: Vec<String>,
    url: Option<String>,
    engine: Option<Arc<dyn TemplateEngine>>,
    document: Option<Arc<dyn Document>>,
    transport: Option<Arc<dyn Transport>>,
}

impl SpindleBuilder {
    fn new() -> Self {
        Self {
            state: Vec::new(),
            container: None,
            pages: Vec::new(),
            url: None,
            engine: None,
            document: None,
            transport: None,
        }
    }

    /// Seed one initial state entry.
    pub fn state(mut self, key: &str, value: Value) -> Self {
        self.state.push((key.to_string(), value));
        self
    }

    /// Seed initial state from a JSON object's entries.
    pub fn store(mut self, seed: Value) -> Self {
        if let Value::Object(entries) = seed {
            self.state.extend(entries);
        }
        self
    }

    /// The default mount selector.
    pub fn container(mut self, selector: &str) -> Self {
        self.container = Some(selector.to_string());
        self
    }

    /// Declare a page. Its template selector is `"#" + id` by convention.
    pub fn page(mut self, id: &str) -> Self {
        self.pages.push(id.to_string());
        self
    }

    /// Declare several pages at once.
    pub fn pages<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages.extend(ids.into_iter().map(Into::into));
        self
    }

    /// The remote endpoint address handed to the transport.
    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// The template engine.
    pub fn engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// The hosting document.
    pub fn document(mut self, document: Arc<dyn Document>) -> Self {
        self.document = Some(document);
        self
    }

    /// The messaging transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Wire everything up and connect the channel.
    ///
    /// Fails with [`SpindleError::MissingDependency`] if any required
    /// piece is absent, and propagates the transport's connect error.
    pub fn build(self) -> Result<Spindle, SpindleError> {
        let engine = self
            .engine
            .ok_or(SpindleError::MissingDependency("template engine"))?;
        let document = self
            .document
            .ok_or(SpindleError::MissingDependency("document"))?;
        let transport = self
            .transport
            .ok_or(SpindleError::MissingDependency("transport"))?;
        let container = self
            .container
            .ok_or(SpindleError::MissingDependency("container"))?;
        let url = self.url.ok_or(SpindleError::MissingDependency("url"))?;

        let store = Arc::new(StateStore::new());
        for (key, value) in self.state {
            store.set(&key, value);
        }

        let renderer = Arc::new(Renderer::new(engine, document, store.clone(), container));
        let channel = transport.connect(&url)?;

        Ok(Spindle {
            store,
            renderer,
            pages: PageRegistry::new(self.pages),
            payload: PayloadComposer::new(),
            handlers: HandlerRegistry::new(),
            channel,
        })
    }
}

impl Default for SpindleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
