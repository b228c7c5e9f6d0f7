//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over admission control backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request from `key` is allowed and update its counter.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;

    /// The quota of a fresh window, reported when `check` fails and the
    /// request is let through unmetered.
    fn full_quota(&self) -> RateLimitResult;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Maximum requests per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Time until the current window resets.
    pub reset_after: Duration,
}

impl RateLimitResult {
    /// Seconds until reset, rounded up so clients never retry early.
    pub fn reset_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs.saturating_add(1)
        } else {
            secs
        }
    }
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(reset_after: Duration) -> RateLimitResult {
        RateLimitResult {
            allowed: true,
            limit: 30,
            remaining: 29,
            reset_after,
        }
    }

    #[test]
    fn reset_secs_rounds_up() {
        assert_eq!(result(Duration::from_millis(59_001)).reset_secs(), 60);
        assert_eq!(result(Duration::from_secs(60)).reset_secs(), 60);
        assert_eq!(result(Duration::ZERO).reset_secs(), 0);
    }
}
