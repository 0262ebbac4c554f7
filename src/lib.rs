//! Spindle — a client-side micro-framework for socket-driven single-page
//! apps.
//!
//! Coordinates three concerns behind one narrow, declarative API: a shared
//! mutable state store, named-page rendering through a template engine, and
//! bidirectional event messaging with a single remote peer. The host
//! registers pages, handlers, and event bindings instead of doing DOM and
//! socket bookkeeping by hand.
//!
//! # Collaborator contracts
//!
//! The concrete template engine, document, and transport are the host's
//! choice, consumed through three traits:
//!
//! - [`TemplateEngine`] — render a template string against a JSON object
//! - [`Document`] — look up elements by selector, get/set their HTML
//! - [`Transport`] / [`Channel`] — connect(url), then emit/on
//!
//! Reference implementations ([`PlaceholderEngine`], [`MemoryDocument`],
//! [`LoopbackTransport`]) make the framework usable headless and in tests.
//!
//! # Flows
//!
//! Inbound: channel event → registered binding → optional callback (mutates
//! the store) → optional re-render. Outbound: host runs a handler, then
//! emits; registered payload keys are merged from the store into the
//! outgoing payload, explicit data winning.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use spindle::{Document, LoopbackTransport, MemoryDocument, PlaceholderEngine, Spindle};
//!
//! let document = Arc::new(MemoryDocument::new());
//! document.insert("#app", "");
//! document.insert("#home", "<h1>{{title}}</h1>");
//!
//! let app = Spindle::builder()
//!     .state("title", json!("welcome"))
//!     .container("#app")
//!     .page("home")
//!     .url("memory://peer")
//!     .engine(Arc::new(PlaceholderEngine))
//!     .document(document.clone())
//!     .transport(Arc::new(LoopbackTransport::new()))
//!     .build()
//!     .unwrap();
//!
//! app.add_payload_key("title").unwrap();
//! app.go("home");
//! assert_eq!(document.get_html("#app").unwrap(), "<h1>welcome</h1>");
//! ```

pub mod app;
pub mod channel;
pub mod document;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod payload;
pub mod render;
pub mod store;
pub mod template;

pub use app::{Spindle, SpindleBuilder};
pub use channel::{Channel, EventCallback, LoopbackChannel, LoopbackTransport, Transport};
pub use document::{Document, MemoryDocument};
pub use error::SpindleError;
pub use handlers::{Handler, HandlerRegistry};
pub use pages::PageRegistry;
pub use payload::PayloadComposer;
pub use render::Renderer;
pub use store::StateStore;
pub use template::{PlaceholderEngine, TemplateEngine};
