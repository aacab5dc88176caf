//! # Logger
//!
//! Process-wide `tracing` setup for the catalog server: a compact console layer, an
//! optional rolling log file (plain or JSON), and `RUST_LOG`-style filtering.
//!
//! ## Example
//!
//! ```rust
//! # use brk_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("catalog")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use brk_domain::config::LoggingConfig;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Settings {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    directives: Option<String>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            directives: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

/// Builder for the global tracing subscriber.
///
/// A name is required before [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct LoggerBuilder<N = NoName> {
    settings: Settings,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { settings: self.settings, name: WithName(name.into()) }
    }
}

impl<N> LoggerBuilder<N> {
    /// Applies the `[logging]` section of the server configuration.
    ///
    /// `level` is treated as a filter directive, so both `"debug"` and
    /// `"brk_docs=debug,info"` are accepted. A non-empty `RUST_LOG` still wins.
    #[must_use]
    pub fn config(mut self, config: &LoggingConfig) -> Self {
        self.settings.console = config.console;
        self.settings.path.clone_from(&config.path);
        self.settings.json = config.json;
        self.settings.directives = Some(config.level.clone());
        self
    }

    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Adds filter directives (e.g. `brk_docs=debug,hyper=info`), used unless
    /// `RUST_LOG` is set.
    #[must_use]
    pub fn env_filter(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes logs to rolling files under `path`.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    /// Emits file logs as JSON lines.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the whole process; dropping it stops the
    /// background file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, invalid
    ///   filter directives, or when no output is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] if the log directory or file
    ///   cannot be created.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: WithName(name) } = self;
        validate(&settings, &name)?;

        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = build_filter(&settings, env.as_deref())?;
        let mut layers = Vec::new();

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = &settings.path {
            fs::create_dir_all(path)
                .context(format!("Failed to create log directory {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(settings.rotation.clone())
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(settings.max_files)
                .build(path)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);
            layers.push(if settings.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid_configuration(
                "No logging output enabled. Enable the console or set a log path.",
            ));
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the initialized logging system.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: NoName }
    }

    /// The file writer guard, present only when file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid_configuration("Logger name cannot be empty"));
    }
    if settings.path.is_some() && settings.max_files == 0 {
        return Err(LoggerError::invalid_configuration("max_files must be greater than zero"));
    }
    Ok(())
}

/// Where the active filter directives come from.
#[derive(Debug, PartialEq, Eq)]
enum FilterSource<'a> {
    /// A non-empty `RUST_LOG`, parsed leniently.
    Env(&'a str),
    /// `[logging] level` or [`LoggerBuilder::env_filter`], parsed strictly.
    Configured(&'a str),
    Default,
}

fn filter_source<'a>(configured: Option<&'a str>, env: Option<&'a str>) -> FilterSource<'a> {
    match (env.map(str::trim).filter(|e| !e.is_empty()), configured) {
        (Some(env), _) => FilterSource::Env(env),
        (None, Some(directives)) => FilterSource::Configured(directives),
        (None, None) => FilterSource::Default,
    }
}

fn build_filter(settings: &Settings, env: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());

    match filter_source(settings.directives.as_deref(), env) {
        FilterSource::Env(directives) => Ok(builder.parse_lossy(directives)),
        FilterSource::Configured(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::invalid_configuration(format!(
                "Invalid filter directives '{directives}': {e}"
            ))
        }),
        FilterSource::Default => Ok(builder.parse_lossy("")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = Logger::builder().name("test-app");
        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert!(builder.settings.path.is_none());
        assert!(builder.settings.directives.is_none());
    }

    #[test]
    fn config_section_is_applied() {
        let config = LoggingConfig {
            level: "brk_docs=debug".to_owned(),
            console: false,
            path: Some(PathBuf::from("/tmp/brk-logs")),
            json: true,
        };
        let builder = Logger::builder().config(&config).name("test-app");

        assert!(!builder.settings.console);
        assert!(builder.settings.json);
        assert_eq!(builder.settings.directives.as_deref(), Some("brk_docs=debug"));
        assert_eq!(builder.settings.path.as_deref(), Some(std::path::Path::new("/tmp/brk-logs")));
    }

    #[test]
    fn rust_log_takes_precedence_over_configured_level() {
        assert_eq!(
            filter_source(Some("info"), Some("brk_docs=trace")),
            FilterSource::Env("brk_docs=trace")
        );
        assert_eq!(filter_source(Some("info"), Some("  ")), FilterSource::Configured("info"));
        assert_eq!(filter_source(Some("info"), None), FilterSource::Configured("info"));
        assert_eq!(filter_source(None, Some("debug")), FilterSource::Env("debug"));
        assert_eq!(filter_source(None, None), FilterSource::Default);
    }

    #[test]
    fn invalid_settings_are_rejected_before_install() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let bad = Logger::builder().env_filter("brk=verbose").settings;
        let err = build_filter(&bad, None).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(build_filter(&bad, Some("info")).is_ok());

        let err = Logger::builder().name("app").console(false).init().unwrap_err();
        assert!(err.to_string().contains("No logging output enabled"));
    }
}
