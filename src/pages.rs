use std::collections::BTreeSet;
use std::sync::RwLock;

use tracing::error;

use crate::render::Renderer;

/// Named application pages and the current-page field.
///
/// The declared set is fixed at construction; only the current page moves.
/// A page's template selector is `"#" + id` by convention.
pub struct PageRegistry {
    declared: BTreeSet<String>,
    current: RwLock<Option<String>>,
}

impl PageRegistry {
    pub(crate) fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declared: pages.into_iter().map(Into::into).collect(),
            current: RwLock::new(None),
        }
    }

    /// Check whether a page was declared at construction.
    pub fn is_declared(&self, page: &str) -> bool {
        self.declared.contains(page)
    }

    /// The page most recently passed to [`go`](PageRegistry::go), declared
    /// or not. `None` before the first transition.
    pub fn current(&self) -> Option<String> {
        let current = self.current.read().unwrap();
        current.clone()
    }

    /// Transition to `target`.
    ///
    /// A declared target renders `"#" + target` into the default container.
    /// An undeclared target logs an error and renders nothing — but the
    /// current page still advances to `target`, so the store of record can
    /// claim a page whose view was never shown. Hosts relying on
    /// [`current`](PageRegistry::current) must account for that.
    pub(crate) fn go(&self, target: &str, renderer: &Renderer) {
        if self.declared.contains(target) {
            renderer.render(&format!("#{target}"), None);
        } else {
            error!(page = target, "page not declared, nothing rendered");
        }
        let mut current = self.current.write().unwrap();
        *current = Some(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, MemoryDocument};
    use crate::store::StateStore;
    use crate::template::PlaceholderEngine;
    use std::sync::Arc;

    fn renderer(doc: Arc<MemoryDocument>) -> Renderer {
        Renderer::new(
            Arc::new(PlaceholderEngine),
            doc,
            Arc::new(StateStore::new()),
            "#app".to_string(),
        )
    }

    // ========================================================================
    // Declared transitions
    // ========================================================================

    #[test]
    fn go_declared_renders_and_sets_current() {
        let doc = Arc::new(MemoryDocument::new());
        doc.insert("#app", "");
        doc.insert("#home", "<h1>home</h1>");
        let renderer = renderer(doc.clone());
        let pages = PageRegistry::new(["home", "quiz"]);

        pages.go("home", &renderer);

        assert_eq!(doc.get_html("#app"), Some("<h1>home</h1>".to_string()));
        assert_eq!(pages.current(), Some("home".to_string()));
    }

    #[test]
    fn go_switches_between_pages() {
        let doc = Arc::new(MemoryDocument::new());
        doc.insert("#app", "");
        doc.insert("#home", "home");
        doc.insert("#quiz", "quiz");
        let renderer = renderer(doc.clone());
        let pages = PageRegistry::new(["home", "quiz"]);

        pages.go("home", &renderer);
        pages.go("quiz", &renderer);

        assert_eq!(doc.get_html("#app"), Some("quiz".to_string()));
        assert_eq!(pages.current(), Some("quiz".to_string()));
    }

    // ========================================================================
    // Undeclared transitions
    // ========================================================================

    #[test]
    fn go_undeclared_renders_nothing_but_still_sets_current() {
        let doc = Arc::new(MemoryDocument::new());
        doc.insert("#app", "untouched");
        let renderer = renderer(doc.clone());
        let pages = PageRegistry::new(["home"]);

        pages.go("ghost", &renderer);

        assert_eq!(doc.get_html("#app"), Some("untouched".to_string()));
        assert_eq!(pages.current(), Some("ghost".to_string()));
    }

    #[test]
    fn declared_transition_recovers_from_undeclared() {
        let doc = Arc::new(MemoryDocument::new());
        doc.insert("#app", "");
        doc.insert("#home", "home");
        let renderer = renderer(doc.clone());
        let pages = PageRegistry::new(["home"]);

        pages.go("ghost", &renderer);
        pages.go("home", &renderer);

        assert_eq!(doc.get_html("#app"), Some("home".to_string()));
        assert_eq!(pages.current(), Some("home".to_string()));
    }

    // ========================================================================
    // Initial state
    // ========================================================================

    #[test]
    fn no_page_before_first_transition() {
        let pages = PageRegistry::new(["home"]);
        assert_eq!(pages.current(), None);
    }

    #[test]
    fn is_declared_checks_membership() {
        let pages = PageRegistry::new(["home", "results"]);
        assert!(pages.is_declared("home"));
        assert!(pages.is_declared("results"));
        assert!(!pages.is_declared("ghost"));
    }
}
