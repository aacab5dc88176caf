use crate::constants::{DEFAULT_STYLESHEET, DEFAULT_TITLE};
use crate::service::{ConfigValue, ServicePlan};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level server configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub docs: DocsConfig,
    pub catalog: CatalogConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `brk_docs=debug,info`. A non-empty `RUST_LOG` overrides it.
    pub level: String,
    pub console: bool,
    /// Directory for rolling log files; console-only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

/// Presentation settings for the rendered documentation pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub title: String,
    /// URL of the CSS bundle every page links.
    pub stylesheet: String,
}

/// Operator overrides applied on top of the built-in catalog, keyed by service id.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub services: BTreeMap<String, ServiceOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceOverride {
    pub enabled: bool,
    /// Entries merged over the built-in configuration, key by key.
    pub config: BTreeMap<String, ConfigValue>,
    pub custom_plans: Vec<ServicePlan>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 8080, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), console: true, path: None, json: false }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self { title: DEFAULT_TITLE.to_owned(), stylesheet: DEFAULT_STYLESHEET.to_owned() }
    }
}

impl Default for ServiceOverride {
    fn default() -> Self {
        Self { enabled: true, config: BTreeMap::new(), custom_plans: Vec::new() }
    }
}
