//! # Service Catalog
//!
//! The process-wide registry of service definitions.
//!
//! * [`ServiceRegistry`] is built once at startup, validated (unique, non-empty ids and
//!   names), and shared read-only with every request handler.
//! * [`builtin`] holds the static catalog shipped with the server and applies operator
//!   overrides from configuration.
//!
//! ## Example
//!
//! ```rust
//! use brk_catalog::ServiceRegistry;
//! use brk_domain::service::ServiceDefinition;
//!
//! let registry = ServiceRegistry::new([ServiceDefinition::new("svc-1", "Example Service")])?;
//! assert_eq!(registry.lookup("svc-1")?.name, "Example Service");
//! # Ok::<(), brk_catalog::RegistryError>(())
//! ```

pub mod builtin;
mod error;
mod registry;

pub use crate::error::{RegistryError, RegistryErrorExt};
pub use crate::registry::ServiceRegistry;
