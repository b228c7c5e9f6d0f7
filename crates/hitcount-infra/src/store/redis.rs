//! Redis counter store with connection manager and bounded command time.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};

use hitcount_core::ports::CounterStore;
use hitcount_core::{ConnectionState, StoreError};

use super::ConnectionMonitor;

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Bound on the initial connection attempt
    pub connect_timeout: Duration,
    /// Bound on every command
    pub command_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://redis:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            command_timeout: Duration::from_millis(2000),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            command_timeout: std::env::var("REDIS_COMMAND_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.command_timeout),
        }
    }

    /// The URL with any password masked, safe to log.
    pub fn redacted_url(&self) -> String {
        match url::Url::parse(&self.url) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("****"));
                }
                parsed.to_string()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }
}

/// Redis-backed counter store.
///
/// Uses a connection manager, which reconnects on its own after the
/// connection drops. Failed commands are never retried here.
pub struct RedisCounterStore {
    conn: ConnectionManager,
    config: RedisConfig,
    monitor: ConnectionMonitor,
}

impl RedisCounterStore {
    /// Open the connection. Any failure here is a `ConnectFailure`.
    pub async fn connect(
        config: RedisConfig,
        monitor: ConnectionMonitor,
    ) -> Result<Self, StoreError> {
        monitor.set(ConnectionState::Connecting);

        let client = Client::open(config.url.as_str()).map_err(|e| {
            monitor.set(ConnectionState::Disconnected);
            StoreError::ConnectFailure(describe(&e))
        })?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::ConnectFailure("connection timed out".to_string()))
            .and_then(|res| res.map_err(|e| StoreError::ConnectFailure(describe(&e))))
            .inspect_err(|_| {
                monitor.set(ConnectionState::Disconnected);
            })?;

        monitor.set(ConnectionState::Ready);
        tracing::info!(url = %config.redacted_url(), "Connected to Redis counter store");

        Ok(Self {
            conn,
            config,
            monitor,
        })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr_and_get(&self, key: &str) -> Result<i64, StoreError> {
        // Only a connected store is ever constructed, and the manager
        // reconnects on demand, so every state past `connect` sends the command.
        let mut conn = self.conn.clone();
        let outcome =
            tokio::time::timeout(self.config.command_timeout, conn.incr::<_, _, i64>(key, 1))
                .await;

        match outcome {
            Ok(Ok(count)) => {
                self.monitor.set(ConnectionState::Ready);
                Ok(count)
            }
            Ok(Err(e)) => {
                if is_connection_loss(&e) {
                    self.monitor.set(ConnectionState::Errored);
                }
                tracing::warn!(key = %key, error = %describe(&e), "Redis INCR failed");
                Err(StoreError::Unavailable(describe(&e)))
            }
            Err(_) => {
                self.monitor.set(ConnectionState::Errored);
                tracing::warn!(key = %key, "Redis INCR timed out");
                Err(StoreError::Unavailable("command timed out".to_string()))
            }
        }
    }

    fn state(&self) -> ConnectionState {
        self.monitor.state()
    }
}

fn is_connection_loss(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
}

// Redis error text can carry the server address; only the category leaves this module.
fn describe(e: &RedisError) -> String {
    e.category().to_string()
}
