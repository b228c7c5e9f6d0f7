//! JSON bodies returned by the counter service and the proxy.

use serde::{Deserialize, Serialize};

/// Body of a successful `GET /api`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterResponse {
    pub message: String,
    pub count: i64,
}

impl CounterResponse {
    pub const GREETING: &'static str = "Hello from Rust backend 👋";

    pub fn new(count: i64) -> Self {
        Self {
            message: Self::GREETING.to_string(),
            count,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Error body shared by every failing endpoint.
///
/// `message` carries a diagnostic and is omitted when there is nothing
/// to add to `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    // Common error constructors
    pub fn too_many_requests() -> Self {
        Self::new("Too many requests, please try again later.")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("Internal server error").with_message(message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new("Method not allowed")
    }

    pub fn proxy_failure(message: impl Into<String>) -> Self {
        Self::new("Failed to proxy request to backend").with_message(message)
    }
}
