//! Application configuration loaded from environment variables.

use std::env;

use hitcount_infra::{RateLimitConfig, RedisConfig};

use crate::middleware::rate_limit::ClientIdentity;

/// Which counter store backs `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// Process-local counter, for running without Redis.
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub redis: RedisConfig,
    pub rate_limit: RateLimitConfig,
    pub client_identity: ClientIdentity,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let store = match env::var("COUNTER_STORE") {
            Ok(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown COUNTER_STORE, using redis");
                StoreBackend::Redis
            }),
            Err(_) => StoreBackend::Redis,
        };

        let trust_proxy_headers = env::var("TRUST_PROXY_HEADERS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            store,
            redis: RedisConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            client_identity: if trust_proxy_headers {
                ClientIdentity::Forwarded
            } else {
                ClientIdentity::PeerAddr
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parsing() {
        assert_eq!(StoreBackend::parse("Redis"), Some(StoreBackend::Redis));
        assert_eq!(StoreBackend::parse(" memory "), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("postgres"), None);
    }
}
