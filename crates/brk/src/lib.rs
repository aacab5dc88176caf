//! Facade crate for the service broker.
//! Re-exports domain/kernel primitives and builds the service registry from config.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `brk` with the `server` feature to get the HTTP routes and page handlers.
//! - Call [`init`] once at startup and hand the registry to the request state.

pub use brk_catalog as catalog;
pub use brk_domain as domain;
pub use brk_kernel as kernel;

use brk_catalog::{RegistryError, ServiceRegistry};
use brk_domain::config::ApiConfig;

#[cfg(feature = "server")]
pub mod server {
    pub use brk_docs as docs;

    pub mod router {
        pub use brk_kernel::server::router::{catalog_router, system_router};
    }
}

/// Builds the service registry: the built-in catalog with the operator's
/// `[catalog]` overrides applied.
///
/// # Errors
/// Returns [`RegistryError::Configuration`] if an override names an unknown service
/// or the resulting catalog has duplicate ids, names or plan ids.
pub fn init(config: &ApiConfig) -> Result<ServiceRegistry, RegistryError> {
    catalog::builtin::builtin_registry(&config.catalog)
}
