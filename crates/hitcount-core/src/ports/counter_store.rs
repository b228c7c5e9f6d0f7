use async_trait::async_trait;

use crate::domain::ConnectionState;
use crate::error::StoreError;

/// Counter store trait - abstraction over the shared key-value store.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key` and return the new value.
    /// An absent key counts as zero, so the first call returns 1.
    async fn incr_and_get(&self, key: &str) -> Result<i64, StoreError>;

    /// Current connection state, readable without awaiting.
    fn state(&self) -> ConnectionState;
}
