//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{CodeGeneratorManager, GeneratorRegistry, ValidatorRegistry};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Code generation manager.
    pub manager: Arc<CodeGeneratorManager>,
    /// Prometheus render handle (absent when metrics are disabled).
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state with the built-in generators and validators.
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_registries(
            config,
            Arc::new(GeneratorRegistry::with_defaults()),
            Arc::new(ValidatorRegistry::with_defaults()),
        )
    }

    /// Create a new application state with caller-populated registries.
    pub fn with_registries(
        config: Arc<AppConfig>,
        generators: Arc<GeneratorRegistry>,
        validators: Arc<ValidatorRegistry>,
    ) -> Self {
        let manager = Arc::new(CodeGeneratorManager::with_registries(generators, validators));

        Self {
            config,
            manager,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
