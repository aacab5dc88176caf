//! # Service Broker Server
//!
//! Serves the service catalog over HTTP: JSON lookups under `/services/{id}`, a health
//! check, and the `/docs` and `/service-config` HTML pages.
//!
//! ## Example
//! ```no_run
//! use brk_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(8080)
//!         .build()?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, ensure};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use brk::domain::config::{ApiConfig, SslConfig};
use brk::kernel::server::ApiState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Consumes the builder and prepares everything the server needs to listen.
    ///
    /// # Process
    /// 1. Checks the SSL certificate and key, when configured
    /// 2. Builds the service registry from the built-in catalog and `[catalog]` overrides
    /// 3. Constructs the shared request state
    /// 4. Builds the router, compiling the documentation page layouts
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * A catalog override is invalid or the catalog has duplicate ids or names
    /// * A documentation page cannot be prepared (e.g. an empty stylesheet URL)
    pub fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(%address, "Initializing server");

        let registry = brk::init(&self.cfg).context("Failed to build the service catalog")?;

        let state = ApiState::builder()
            .config(self.cfg)
            .registry(registry)
            .build()
            .context("Failed to finalize API state")?;

        let app = router::init(state.clone())?;

        Ok(Server { state, app })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
    app: Router,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            %address,
            ssl = cfg.server.ssl.is_some(),
            services = self.state.registry.len(),
            "Starting server"
        );

        let handle = Handle::<SocketAddr>::new();
        spawn_shutdown_watcher(handle.clone());
        let service = self.app.into_make_service();

        match &cfg.server.ssl {
            Some(ssl) => {
                let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .with_context(|| {
                        format!("Failed to load TLS material from {}", ssl.cert.display())
                    })?;

                info!("Listening on https://{address}");
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTPS listener stopped with an error")?;
            }
            None => {
                info!("Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(service)
                    .await
                    .context("HTTP listener stopped with an error")?;
            }
        }

        info!("Server shutdown complete");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// The fully assembled router, for serving through another listener or in tests.
    #[must_use]
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Fails early on a missing certificate or key; warns when the key is group/world readable.
fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    for (what, path) in [("certificate", &ssl.cert), ("private key", &ssl.key)] {
        ensure!(path.exists(), "SSL {what} not found at: {}", path.display());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            let octal = format!("{:o}", mode & 0o777);
            warn!(
                key = %ssl.key.display(),
                mode = %octal,
                "TLS private key is accessible by group or others (expected 600)"
            );
        }
    }

    Ok(())
}

fn spawn_shutdown_watcher(handle: Handle<SocketAddr>) {
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => {
                info!(
                    grace_secs = SHUTDOWN_GRACE.as_secs(),
                    "Shutdown requested, draining connections"
                );
                handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
            }
            Err(e) => error!("Cannot listen for shutdown signals: {e}"),
        }
    });
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        tokio::select! {
            res = signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await
    }
}
