pub use crate::config::{ConfigError, load_config};
pub use brk_catalog::{RegistryError, ServiceRegistry};
pub use brk_domain::config::ApiConfig;

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError};
