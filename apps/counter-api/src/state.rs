//! Application state - shared across all handlers.

use std::sync::Arc;

use hitcount_core::StoreError;
use hitcount_core::ports::{CounterStore, RateLimiter};
use hitcount_infra::{ConnectionMonitor, InMemoryCounterStore, InMemoryRateLimiter, RedisCounterStore};

use crate::config::{AppConfig, StoreBackend};
use crate::middleware::rate_limit::ClientIdentity;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CounterStore>,
    pub limiter: Arc<dyn RateLimiter>,
    pub client_identity: ClientIdentity,
}

impl AppState {
    /// Connect the counter store and build the rate limiter.
    ///
    /// Fails only when the initial store connection fails.
    pub async fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn CounterStore> = match config.store {
            StoreBackend::Redis => {
                let monitor = ConnectionMonitor::new();
                monitor.spawn_logger("redis");
                tracing::info!(url = %config.redis.redacted_url(), "Connecting to Redis");
                Arc::new(RedisCounterStore::connect(config.redis.clone(), monitor).await?)
            }
            StoreBackend::Memory => {
                tracing::warn!("COUNTER_STORE=memory - counter is per-process and not persisted");
                Arc::new(InMemoryCounterStore::new())
            }
        };

        let limiter = Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));
        limiter.clone().spawn_sweeper();
        tracing::info!(
            max_requests = config.rate_limit.max_requests,
            window_secs = config.rate_limit.window.as_secs(),
            "Rate limiter initialized"
        );

        Ok(Self {
            store,
            limiter,
            client_identity: config.client_identity,
        })
    }
}
