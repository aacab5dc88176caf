//! Route paths, tags and presentation defaults shared across crates.

pub const DOCS_PATH: &str = "/docs";
pub const SERVICE_CONFIG_PATH: &str = "/service-config";

pub const HTML_CONTENT_TYPE: &str = "text/html";

pub const DEFAULT_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
pub const DEFAULT_TITLE: &str = "Service Broker";

pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
