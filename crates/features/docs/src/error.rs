use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use tracing::error;

/// Page preparation and rendering errors.
#[brk_derive::brk_error]
pub enum DocsError {
    /// The page template could not be prepared; reported at handler registration.
    #[error("Docs setup error{}: {message}", format_context(.context))]
    Setup { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Writing service data into a prepared page failed.
    #[error("Docs render error{}: {source}", format_context(.context))]
    Render { source: std::fmt::Error, context: Option<Cow<'static, str>> },
}

impl IntoResponse for DocsError {
    fn into_response(self) -> Response {
        error!(error = %self, "Failed to render documentation page");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
