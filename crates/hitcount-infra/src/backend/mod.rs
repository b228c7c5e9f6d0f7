//! Counter backend clients.

mod http;

pub use http::{HttpBackendConfig, HttpCounterBackend};
