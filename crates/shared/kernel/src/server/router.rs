use super::state::StartedAt;
use super::{catalog, health};
use axum::extract::FromRef;
use brk_catalog::ServiceRegistry;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `GET /health`.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    ServiceRegistry: FromRef<S>,
    StartedAt: FromRef<S>,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}

/// `GET /services/{id}`.
pub fn catalog_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    ServiceRegistry: FromRef<S>,
{
    OpenApiRouter::<S>::new().routes(routes!(catalog::service_handler))
}
