//! # Hitcount Shared
//!
//! Types shared between the counter service, the proxy, and the client page.

pub mod response;
pub mod view;

pub use response::{CounterResponse, ErrorBody, HealthResponse};
pub use view::{CallState, HTTP_ERROR_PREFIX, IDLE_LABEL, LOADING_LABEL};
