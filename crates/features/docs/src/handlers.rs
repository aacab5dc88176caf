use crate::docs::DocsRenderer;
use crate::document::{RenderedDocument, Renderer};
use crate::error::{DocsError, DocsErrorExt};
use crate::service_config::ServiceConfigRenderer;
use crate::template::PageTemplate;
use axum::Router;
use axum::routing::get;
use brk_catalog::ServiceRegistry;
use brk_domain::config::DocsConfig;
use brk_domain::constants::{DOCS_PATH, SERVICE_CONFIG_PATH};
use std::sync::Arc;
use tracing::info;

/// Registers `GET /docs`, listing every service with its descriptive metadata.
///
/// The page layout is compiled here, before any request can arrive.
///
/// # Errors
/// Returns [`DocsError::Setup`] if the layout cannot be prepared.
pub fn add_docs_handler<S>(
    router: Router<S>,
    registry: ServiceRegistry,
    config: &DocsConfig,
) -> Result<Router<S>, DocsError>
where
    S: Clone + Send + Sync + 'static,
{
    let template = PageTemplate::builtin(config).context("preparing the docs page")?;
    Ok(add_page(router, DOCS_PATH, DocsRenderer::new(template), registry))
}

/// Registers `GET /service-config`, listing every service's name, id and configuration.
///
/// # Errors
/// Returns [`DocsError::Setup`] if the layout cannot be prepared.
pub fn add_service_config_handler<S>(
    router: Router<S>,
    registry: ServiceRegistry,
    config: &DocsConfig,
) -> Result<Router<S>, DocsError>
where
    S: Clone + Send + Sync + 'static,
{
    let template = PageTemplate::builtin(config).context("preparing the service-config page")?;
    Ok(add_page(router, SERVICE_CONFIG_PATH, ServiceConfigRenderer::new(template), registry))
}

/// Mounts `renderer` at `path`; each request renders the registry's full enumeration.
pub fn add_page<S, R>(
    router: Router<S>,
    path: &str,
    renderer: R,
    registry: ServiceRegistry,
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    R: Renderer,
{
    let renderer = Arc::new(renderer);
    info!(path, services = registry.len(), "Documentation page registered");

    router.route(
        path,
        get(move || {
            let renderer = Arc::clone(&renderer);
            let registry = registry.clone();
            async move { render_page(renderer.as_ref(), &registry) }
        }),
    )
}

fn render_page<R: Renderer + ?Sized>(
    renderer: &R,
    registry: &ServiceRegistry,
) -> Result<RenderedDocument, DocsError> {
    renderer.render(registry.get_all_services())
}
