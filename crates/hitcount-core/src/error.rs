//! Domain-level error types.

use thiserror::Error;

/// Counter store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The initial connection could not be established. Fatal at startup.
    #[error("Counter store connection failed: {0}")]
    ConnectFailure(String),

    /// The store is down or the command failed. Recoverable per request.
    #[error("Counter store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::ConnectFailure(_))
    }
}

/// Errors raised while forwarding a request to the counter backend.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The backend could not be reached or did not answer in time.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a body that is not JSON.
    #[error("Invalid backend response: {0}")]
    InvalidBody(String),
}
