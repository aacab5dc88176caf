//! # Documentation Pages
//!
//! Human-readable HTML views of the service registry.
//!
//! * `GET /docs` ([`DocsRenderer`]): every service name with description, tags,
//!   metadata, plans and provision/bind inputs.
//! * `GET /service-config` ([`ServiceConfigRenderer`]): every service name and id with
//!   its resolved configuration.
//!
//! Both pages share one layout ([`PageTemplate`]) that links the configured stylesheet.
//! The layout is compiled when a handler is registered, so a broken layout fails
//! startup instead of a request. Pages are rendered fresh per request and never cached.
//!
//! ## Example
//!
//! ```rust
//! use axum::Router;
//! use brk_catalog::ServiceRegistry;
//! use brk_domain::config::DocsConfig;
//!
//! let registry = ServiceRegistry::default();
//! let config = DocsConfig::default();
//!
//! let router: Router = brk_docs::add_docs_handler(Router::new(), registry.clone(), &config)?;
//! let router = brk_docs::add_service_config_handler(router, registry, &config)?;
//! # let _ = router;
//! # Ok::<(), brk_docs::DocsError>(())
//! ```

mod docs;
mod document;
mod error;
mod handlers;
mod html;
mod service_config;
mod template;

pub use crate::docs::DocsRenderer;
pub use crate::document::{RenderedDocument, Renderer};
pub use crate::error::{DocsError, DocsErrorExt};
pub use crate::handlers::{add_docs_handler, add_page, add_service_config_handler};
pub use crate::html::escape;
pub use crate::service_config::ServiceConfigRenderer;
pub use crate::template::{LAYOUT, PageTemplate};
