use axum::extract::FromRef;
use brk_catalog::ServiceRegistry;
use brk_domain::config::ApiConfig;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[brk_derive::brk_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub registry: ServiceRegistry,
    pub started_at: StartedAt,
}

/// The moment the request state was built, i.e. server startup.
#[derive(Debug, Clone, Copy)]
pub struct StartedAt(Instant);

impl StartedAt {
    #[must_use]
    pub fn now() -> Self {
        Self(Instant::now())
    }

    #[must_use]
    pub fn elapsed(self) -> Duration {
        self.0.elapsed()
    }
}

/// Request state shared by every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for ServiceRegistry {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.registry.clone()
    }
}

impl FromRef<ApiState> for StartedAt {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.started_at
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    registry: Option<ServiceRegistry>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: ServiceRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// # Errors
    /// Returns [`ApiStateError::Validation`] if no registry was provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let registry = self
            .registry
            .ok_or_else(|| ApiStateError::validation("ServiceRegistry not provided"))?;
        let config = self.config.unwrap_or_default();

        let started_at = StartedAt::now();
        Ok(ApiState { inner: Arc::new(ApiStateInner { config, registry, started_at }) })
    }
}
