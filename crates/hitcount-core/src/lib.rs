//! # Hitcount Core
//!
//! The domain layer of the hitcount services.
//! This crate contains the counter contract and the ports the services depend on,
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{COUNTER_KEY, ConnectionState};
pub use error::{ProxyError, StoreError};
