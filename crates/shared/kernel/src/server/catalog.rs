use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use brk_catalog::{RegistryError, ServiceRegistry};
use brk_domain::constants::CATALOG_TAG;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(super) struct ErrorResponse {
    /// Human-readable reason
    error: String,
}

#[utoipa::path(
    get,
    path = "/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = OK, description = "The service definition"),
        (status = NOT_FOUND, description = "No service with that id", body = ErrorResponse),
    ),
    tag = CATALOG_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn service_handler(
    State(registry): State<ServiceRegistry>,
    Path(id): Path<String>,
) -> Response {
    match registry.lookup(&id) {
        Ok(service) => Json(service).into_response(),
        Err(err @ RegistryError::NotFound { .. }) => {
            debug!(%id, "Service lookup missed");
            (StatusCode::NOT_FOUND, Json(ErrorResponse { error: err.to_string() })).into_response()
        }
        Err(err) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: err.to_string() }))
                .into_response()
        }
    }
}
