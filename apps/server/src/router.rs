use anyhow::{Context, Result};
use axum::Router;
use brk::kernel::prelude::ApiState;
use brk::server::docs::{add_docs_handler, add_service_config_handler};
use brk::server::router::{catalog_router, system_router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Service Broker", description = "Service catalog and documentation pages"))]
struct ApiDoc;

/// Assembles the application router: JSON routes described in `OpenAPI`, the HTML
/// documentation pages, and the Scalar UI at `/api`.
///
/// The page layouts are compiled here, so a broken layout is reported before the
/// server starts listening.
pub(crate) fn init(state: ApiState) -> Result<Router> {
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router())
        .merge(catalog_router())
        .split_for_parts();

    let docs = &state.config.docs;
    let router = add_docs_handler(openapi_routes, state.registry.clone(), docs)
        .context("Failed to register the /docs page")?;
    let router = add_service_config_handler(router, state.registry.clone(), docs)
        .context("Failed to register the /service-config page")?;

    Ok(router
        .merge(Scalar::with_url("/api", api_doc))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
