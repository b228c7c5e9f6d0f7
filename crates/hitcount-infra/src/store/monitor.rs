//! Connection lifecycle tracking for counter stores.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use hitcount_core::ConnectionState;

/// Publishes a store's [`ConnectionState`].
///
/// Handlers read the current state synchronously; observers subscribe and
/// are woken on every transition. Clones share the same channel.
#[derive(Clone)]
pub struct ConnectionMonitor {
    tx: Arc<watch::Sender<ConnectionState>>,
}

impl ConnectionMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::Disconnected);
        Self { tx: Arc::new(tx) }
    }

    pub fn state(&self) -> ConnectionState {
        *self.tx.borrow()
    }

    /// Move to `next`. Returns `true` if the state actually changed.
    pub fn set(&self, next: ConnectionState) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }

    /// Spawn a task that logs every transition of this monitor.
    ///
    /// Losing the connection is logged as an error and nothing more; the
    /// process keeps serving.
    pub fn spawn_logger(&self, store: &'static str) -> JoinHandle<()> {
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            let mut previous = None;
            loop {
                let state = *rx.borrow_and_update();
                match state {
                    ConnectionState::Disconnected => {
                        tracing::debug!(store = store, "Counter store disconnected")
                    }
                    ConnectionState::Connecting => {
                        tracing::info!(store = store, "Counter store connecting...")
                    }
                    ConnectionState::Ready if previous == Some(ConnectionState::Errored) => {
                        tracing::info!(store = store, "Counter store reconnected")
                    }
                    ConnectionState::Ready => {
                        tracing::info!(store = store, "Counter store connected and ready")
                    }
                    ConnectionState::Errored => tracing::error!(
                        store = store,
                        "Counter store connection lost, waiting for reconnect"
                    ),
                }

                previous = Some(state);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}

impl Default for ConnectionMonitor {
    fn default() -> Self {
        Self::new()
    }
}
