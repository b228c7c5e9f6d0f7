//! Application state - shared across all handlers.

use std::sync::Arc;

use hitcount_core::ProxyError;
use hitcount_core::ports::CounterBackend;
use hitcount_infra::HttpCounterBackend;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CounterBackend>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ProxyError> {
        let backend = HttpCounterBackend::new(&config.backend)?;
        tracing::info!(
            timeout_secs = config.backend.timeout.as_secs(),
            "Counter backend client initialized"
        );

        Ok(Self {
            backend: Arc::new(backend),
        })
    }
}
