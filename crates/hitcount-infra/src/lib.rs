//! # Hitcount Infrastructure
//!
//! Concrete implementations of the ports defined in `hitcount-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `redis` - Redis counter store
//! - `http` - reqwest client for the counter backend

#[cfg(feature = "http")]
pub mod backend;
pub mod rate_limit;
pub mod store;
pub mod telemetry;

// Re-exports - In-Memory
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use store::{ConnectionMonitor, InMemoryCounterStore};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisCounterStore};

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use backend::{HttpBackendConfig, HttpCounterBackend};
