use std::collections::HashMap;
use std::sync::RwLock;

/// Contract the framework consumes the hosting document through.
///
/// Selectors are opaque strings resolved by the host (`"#quiz"` in a real
/// DOM, any convention in a headless host). The framework only ever looks
/// an element up, reads its markup, or replaces its content.
pub trait Document: Send + Sync {
    /// Check whether an element exists for the selector.
    fn contains(&self, selector: &str) -> bool;

    /// Get the inner HTML of the element, or `None` if absent.
    fn get_html(&self, selector: &str) -> Option<String>;

    /// Replace the inner HTML of the element. No-op if the element is
    /// absent (the renderer checks existence first).
    fn set_html(&self, selector: &str, html: &str);
}

/// In-memory document: a selector → markup map.
///
/// Reference implementation for tests and headless hosts. Elements are
/// declared up front with [`insert`](MemoryDocument::insert); templates are
/// just elements whose markup contains placeholders.
pub struct MemoryDocument {
    elements: RwLock<HashMap<String, String>>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            elements: RwLock::new(HashMap::new()),
        }
    }

    /// Declare an element with initial markup.
    pub fn insert(&self, selector: &str, html: &str) {
        let mut elements = self.elements.write().unwrap();
        elements.insert(selector.to_string(), html.to_string());
    }
}

impl Document for MemoryDocument {
    fn contains(&self, selector: &str) -> bool {
        let elements = self.elements.read().unwrap();
        elements.contains_key(selector)
    }

    fn get_html(&self, selector: &str) -> Option<String> {
        let elements = self.elements.read().unwrap();
        elements.get(selector).cloned()
    }

    fn set_html(&self, selector: &str, html: &str) {
        let mut elements = self.elements.write().unwrap();
        if let Some(content) = elements.get_mut(selector) {
            *content = html.to_string();
        }
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}
