//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod backend;
mod clock;
mod counter_store;
mod rate_limit;

pub use backend::{BackendReply, CounterBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use counter_store::CounterStore;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
