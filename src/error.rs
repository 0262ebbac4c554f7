use thiserror::Error;

/// Errors produced by the framework.
///
/// Two families, with different propagation rules:
///
/// - Misconfiguration ([`MissingDependency`](SpindleError::MissingDependency),
///   [`PayloadKey`](SpindleError::PayloadKey),
///   [`UnknownHandler`](SpindleError::UnknownHandler)) is fatal and returned
///   to the caller immediately.
/// - Render-time failures ([`TemplateNotFound`](SpindleError::TemplateNotFound),
///   [`MountPointNotFound`](SpindleError::MountPointNotFound),
///   [`Template`](SpindleError::Template)) depend on the live document and
///   are recovered inside [`Renderer::render`](crate::Renderer::render):
///   logged, render skipped, nothing surfaces to the caller.
#[derive(Error, Debug)]
pub enum SpindleError {
    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),

    #[error("payload error: {0} not in store")]
    PayloadKey(String),

    #[error("handler {0} doesn't exist")]
    UnknownHandler(String),

    #[error("template element {0} not found")]
    TemplateNotFound(String),

    #[error("no element {0} to put rendered content into")]
    MountPointNotFound(String),

    #[error("template error: {0}")]
    Template(String),
}
