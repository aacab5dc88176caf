use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use brk_catalog::ServiceRegistry;
use brk_domain::constants::SYSTEM_TAG;
use serde::Serialize;
use super::state::StartedAt;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(super) struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Seconds since the server state was built
    uptime_secs: u64,
    /// Number of services in the catalog
    services: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = OK, description = "Liveness and catalog size", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn health_handler(
    State(registry): State<ServiceRegistry>,
    State(started_at): State<StartedAt>,
) -> impl IntoResponse {
    let report = HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: started_at.elapsed().as_secs(),
        services: registry.len(),
    };

    ([(header::CACHE_CONTROL, "no-store")], Json(report))
}
