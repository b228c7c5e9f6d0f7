//! Counter store implementations - Redis and in-memory.

mod memory;
mod monitor;

pub use memory::InMemoryCounterStore;
pub use monitor::ConnectionMonitor;

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisCounterStore};
