//! reqwest client for the counter service.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use hitcount_core::ProxyError;
use hitcount_core::ports::{BackendReply, CounterBackend};

/// Response headers relayed from the backend to the proxy's caller.
const RELAYED_HEADERS: [&str; 4] = [
    "ratelimit-limit",
    "ratelimit-remaining",
    "ratelimit-reset",
    "retry-after",
];

/// Backend client configuration.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the counter service (e.g., http://backend:4000)
    pub base_url: String,
    /// Bound on the whole request, body included
    pub timeout: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://backend:4000".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl HttpBackendConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("API_INTERNAL_BASE").unwrap_or(defaults.base_url),
            timeout: std::env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Calls `GET {base_url}/api` and hands back whatever the backend said.
pub struct HttpCounterBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCounterBackend {
    pub fn new(config: &HttpBackendConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProxyError::Transport(describe(e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/api", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CounterBackend for HttpCounterBackend {
    async fn fetch_count(&self) -> Result<BackendReply, ProxyError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(describe(e)))?;

        let status = response.status().as_u16();
        let headers = RELAYED_HEADERS
            .iter()
            .filter_map(|name| {
                let value = response.headers().get(*name)?.to_str().ok()?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                ProxyError::InvalidBody("backend response is not valid JSON".to_string())
            } else {
                ProxyError::Transport(describe(e))
            }
        })?;

        Ok(BackendReply {
            status,
            body,
            headers,
        })
    }
}

// reqwest errors embed the request URL; the backend address must not reach callers.
fn describe(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "backend request timed out".to_string()
    } else if e.is_connect() {
        "backend connection failed".to_string()
    } else {
        e.without_url().to_string()
    }
}
