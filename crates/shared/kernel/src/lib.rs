//! Kernel utilities shared by the server and the feature crates.
//! Keep this crate lightweight: config loading, the request state handed to handlers,
//! and the system routes (`/health`, `/services/{id}`).
//!
//! ## Config loading
//! ```rust,ignore
//! use brk_kernel::config::load_config;
//! use brk_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use brk_catalog as catalog;
pub use brk_domain as domain;
