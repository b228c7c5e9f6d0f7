//! Domain types - the counter and its store connection lifecycle.

mod connection;

pub use connection::ConnectionState;

/// The single key the counter service increments.
pub const COUNTER_KEY: &str = "api:count";
