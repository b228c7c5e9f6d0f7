//! Counter backend port - what the forwarding proxy talks to.

use async_trait::async_trait;

use crate::error::ProxyError;

/// The backend's answer, relayed as-is by the proxy.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: u16,
    pub body: serde_json::Value,
    /// Rate limit headers worth passing through to the caller.
    pub headers: Vec<(String, String)>,
}

/// Client for the counter service's `/api` endpoint.
#[async_trait]
pub trait CounterBackend: Send + Sync {
    /// Issue `GET /api` against the backend.
    ///
    /// Any HTTP status is a reply; only transport failures and
    /// unparseable bodies are errors.
    async fn fetch_count(&self) -> Result<BackendReply, ProxyError>;
}
