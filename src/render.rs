use std::sync::Arc;

use tracing::{debug, error};

use crate::document::Document;
use crate::error::SpindleError;
use crate::store::StateStore;
use crate::template::TemplateEngine;

/// Renders named templates against the live store into mount points.
///
/// Rendering is best-effort: any failure (missing template, missing mount,
/// engine error) is logged and swallowed so a bad view never aborts an
/// otherwise-live session. The fallible path is kept separate in
/// [`try_render`](Renderer::try_render) for callers that want the error.
pub struct Renderer {
    engine: Arc<dyn TemplateEngine>,
    document: Arc<dyn Document>,
    store: Arc<StateStore>,
    container: String,
}

impl Renderer {
    pub(crate) fn new(
        engine: Arc<dyn TemplateEngine>,
        document: Arc<dyn Document>,
        store: Arc<StateStore>,
        container: String,
    ) -> Self {
        Self {
            engine,
            document,
            store,
            container,
        }
    }

    /// The default mount selector.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Render the template at `template` into `mount` (default container
    /// when `None`). Failures are logged, never propagated.
    pub fn render(&self, template: &str, mount: Option<&str>) {
        if let Err(err) = self.try_render(template, mount) {
            error!(template, %err, "render skipped");
        }
    }

    /// Fallible render path.
    ///
    /// The store snapshot is taken here, at render time — mutations between
    /// renders are always visible.
    pub fn try_render(&self, template: &str, mount: Option<&str>) -> Result<(), SpindleError> {
        let mount = mount.unwrap_or(&self.container);
        debug!(template, mount, "rendering template");

        let source = self
            .document
            .get_html(template)
            .ok_or_else(|| SpindleError::TemplateNotFound(template.to_string()))?;
        if !self.document.contains(mount) {
            return Err(SpindleError::MountPointNotFound(mount.to_string()));
        }

        let html = self.engine.render(&source, &self.store.snapshot())?;
        self.document.set_html(mount, &html);
        Ok(())
    }
}
