//! Shared application state.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::orchestrator::InteractionOrchestrator;

/// Cloned into every handler. All fields are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<InteractionOrchestrator>,
    /// Present when the binary installed a Prometheus recorder.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(orchestrator: InteractionOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("orchestrator", &self.orchestrator)
            .field("prometheus", &self.prometheus.is_some())
            .finish()
    }
}
