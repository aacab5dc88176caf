use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for configuration overrides (`BRK__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "BRK";

/// Custom error type for config loading.
#[brk_derive::brk_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering environment overrides over a file.
///
/// 1. **Base File**: settings from `path` (e.g. `server.toml`; the extension may be
///    omitted). Defaults to `"server"`. The file is optional: a missing file leaves every
///    value at its serde default.
/// 2. **Environment Overrides**: variables prefixed with `BRK__`. Nested keys use double
///    underscores, e.g. `BRK__DOCS__STYLESHEET` maps to `docs.stylesheet`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or its contents do not match
/// the structure of `T`.
///
/// # Example
/// ```rust
/// use brk_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("server"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        );

    info!(path = %effective_path.display(), "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
