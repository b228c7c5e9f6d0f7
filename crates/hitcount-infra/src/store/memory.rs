//! In-memory counter store - used for local runs and as a test double.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hitcount_core::ports::CounterStore;
use hitcount_core::{ConnectionState, StoreError};

use super::ConnectionMonitor;

/// In-memory counter store using a HashMap behind an async Mutex.
///
/// Note: Counters are per-process and lost on restart.
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, i64>>,
    monitor: ConnectionMonitor,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        let monitor = ConnectionMonitor::new();
        monitor.set(ConnectionState::Ready);
        Self {
            counters: Mutex::new(HashMap::new()),
            monitor,
        }
    }

    /// Simulate the store going away or coming back.
    pub fn set_online(&self, online: bool) {
        let state = if online {
            ConnectionState::Ready
        } else {
            ConnectionState::Disconnected
        };
        self.monitor.set(state);
    }

    /// Read a counter without touching it.
    pub async fn peek(&self, key: &str) -> Option<i64> {
        self.counters.lock().await.get(key).copied()
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn incr_and_get(&self, key: &str) -> Result<i64, StoreError> {
        let state = self.monitor.state();
        if !state.accepts_commands() {
            return Err(StoreError::Unavailable(format!("connection {state}")));
        }

        let mut counters = self.counters.lock().await;
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    fn state(&self) -> ConnectionState {
        self.monitor.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_key_starts_at_one() {
        let store = InMemoryCounterStore::new();
        assert_eq!(store.peek("api:count").await, None);
        assert_eq!(store.incr_and_get("api:count").await.unwrap(), 1);
        assert_eq!(store.incr_and_get("api:count").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn offline_store_is_unavailable_and_untouched() {
        let store = InMemoryCounterStore::new();
        store.incr_and_get("api:count").await.unwrap();

        store.set_online(false);
        let err = store.incr_and_get("api:count").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.peek("api:count").await, Some(1));

        store.set_online(true);
        assert_eq!(store.incr_and_get("api:count").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let store = std::sync::Arc::new(InMemoryCounterStore::new());
        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.incr_and_get("k").await.unwrap() })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(store.peek("k").await, Some(50));
    }
}
