use crate::error::DocsError;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use brk_domain::constants::HTML_CONTENT_TYPE;
use brk_domain::service::ServiceDefinition;

/// A freshly rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

impl RenderedDocument {
    #[must_use]
    pub fn html(page: String) -> Self {
        Self { body: page.into_bytes(), content_type: HTML_CONTENT_TYPE }
    }
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Turns a registry snapshot into a page.
pub trait Renderer: Send + Sync + 'static {
    /// # Errors
    /// Returns [`DocsError::Render`] if writing the page fails.
    fn render(&self, services: &[ServiceDefinition]) -> Result<RenderedDocument, DocsError>;
}
