use std::fmt;

/// Lifecycle of the connection between a service and its counter store.
///
/// Published by store adapters so request handlers can read it synchronously
/// before issuing a store command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No connection has been opened, or it was closed for good.
    #[default]
    Disconnected,
    /// The initial connection attempt is in flight.
    Connecting,
    /// Commands are being served.
    Ready,
    /// The connection was lost; the client is expected to reconnect on its own.
    Errored,
}

impl ConnectionState {
    /// Whether a command is worth attempting in this state.
    ///
    /// `Errored` still accepts commands because the underlying client
    /// reconnects lazily on the next command.
    pub fn accepts_commands(self) -> bool {
        matches!(self, ConnectionState::Ready | ConnectionState::Errored)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Ready => "ready",
            ConnectionState::Errored => "errored",
        };
        f.write_str(name)
    }
}
