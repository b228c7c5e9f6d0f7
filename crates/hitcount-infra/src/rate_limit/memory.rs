//! In-memory fixed-window rate limiter keyed by client identity.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use hitcount_core::ports::{Clock, RateLimitError, RateLimitResult, RateLimiter, SystemClock};

/// Longest window accepted from the environment.
pub const MAX_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &u32| *n > 0)
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &u64| *n > 0)
                .map(window_from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

fn window_from_secs(secs: u64) -> Duration {
    Duration::from_secs(secs).min(MAX_WINDOW)
}

struct Window {
    count: u32,
    started_at: Instant,
}

/// Fixed-window rate limiter.
///
/// A client's first request opens a window; at most `max_requests` are
/// admitted until the window ends, then the next request opens a fresh one.
/// Bursts straddling a boundary can reach twice the limit.
/// Note: Limits are per-process, not shared across instances.
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Drop windows that have ended. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let window = self.config.window;
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started_at) < window);
        before - windows.len()
    }

    /// Number of clients with a window currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }

    /// Spawn a task that purges ended windows once per window interval.
    pub fn spawn_sweeper(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.window.min(MAX_WINDOW));
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    tracing::debug!(purged = purged, "Purged expired rate limit windows");
                }
            }
        })
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let now = self.clock.now();
        let limit = self.config.max_requests;
        let mut windows = self.windows.lock().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if now.duration_since(window.started_at) >= self.config.window {
            window.count = 0;
            window.started_at = now;
        }

        let allowed = window.count < limit;
        if allowed {
            window.count += 1;
        }

        // Subtract rather than add: `started_at + window` can overflow `Instant`.
        let reset_after = self
            .config
            .window
            .saturating_sub(now.duration_since(window.started_at));

        Ok(RateLimitResult {
            allowed,
            limit,
            remaining: limit.saturating_sub(window.count),
            reset_after,
        })
    }

    fn full_quota(&self) -> RateLimitResult {
        RateLimitResult {
            allowed: true,
            limit: self.config.max_requests,
            remaining: self.config.max_requests,
            reset_after: self.config.window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitcount_core::ports::ManualClock;

    fn limiter(max_requests: u32) -> (InMemoryRateLimiter, ManualClock) {
        let clock = ManualClock::new();
        let config = RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        };
        (
            InMemoryRateLimiter::with_clock(config, Arc::new(clock.clone())),
            clock,
        )
    }

    #[tokio::test]
    async fn admits_up_to_max_then_denies() {
        let (limiter, _clock) = limiter(30);

        for n in 1..=30 {
            let res = limiter.check("10.0.0.1").await.unwrap();
            assert!(res.allowed, "request {n} should be admitted");
            assert_eq!(res.remaining, 30 - n);
        }

        let res = limiter.check("10.0.0.1").await.unwrap();
        assert!(!res.allowed);
        assert_eq!(res.remaining, 0);
        assert_eq!(res.limit, 30);
    }

    #[tokio::test]
    async fn fresh_window_after_expiry() {
        let (limiter, clock) = limiter(2);
        limiter.check("a").await.unwrap();
        limiter.check("a").await.unwrap();
        assert!(!limiter.check("a").await.unwrap().allowed);

        clock.advance(Duration::from_secs(60));

        let res = limiter.check("a").await.unwrap();
        assert!(res.allowed);
        // Count restarted at 1.
        assert_eq!(res.remaining, 1);
        assert_eq!(res.reset_after, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn denied_requests_do_not_extend_the_window() {
        let (limiter, clock) = limiter(1);
        limiter.check("a").await.unwrap();

        clock.advance(Duration::from_secs(45));
        let res = limiter.check("a").await.unwrap();
        assert!(!res.allowed);
        assert_eq!(res.reset_after, Duration::from_secs(15));

        clock.advance(Duration::from_secs(15));
        assert!(limiter.check("a").await.unwrap().allowed);
    }

    #[tokio::test]
    async fn identities_are_counted_separately() {
        let (limiter, _clock) = limiter(1);
        assert!(limiter.check("a").await.unwrap().allowed);
        assert!(limiter.check("b").await.unwrap().allowed);
        assert!(!limiter.check("a").await.unwrap().allowed);
    }

    #[tokio::test]
    async fn boundary_burst_reaches_twice_the_limit() {
        let (limiter, clock) = limiter(3);
        assert!(limiter.check("a").await.unwrap().allowed);
        clock.advance(Duration::from_secs(59));

        // Two at the tail of the first window, three at the head of the next.
        let mut admitted = 0;
        for _ in 0..2 {
            admitted += limiter.check("a").await.unwrap().allowed as u32;
        }
        clock.advance(Duration::from_secs(1));
        for _ in 0..3 {
            admitted += limiter.check("a").await.unwrap().allowed as u32;
        }
        assert_eq!(admitted, 5);
    }

    #[test]
    fn full_quota_reports_an_untouched_window() {
        let (limiter, _clock) = limiter(30);
        let quota = limiter.full_quota();
        assert!(quota.allowed);
        assert_eq!(quota.remaining, 30);
        assert_eq!(quota.reset_secs(), 60);
    }

    #[tokio::test]
    async fn purge_drops_only_ended_windows() {
        let (limiter, clock) = limiter(5);
        limiter.check("old").await.unwrap();
        clock.advance(Duration::from_secs(30));
        limiter.check("new").await.unwrap();
        clock.advance(Duration::from_secs(30));

        assert_eq!(limiter.purge_expired().await, 1);
        assert_eq!(limiter.tracked_clients().await, 1);
    }

    #[tokio::test]
    async fn oversized_window_does_not_overflow() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 30,
            window: Duration::from_secs(u64::MAX),
        });

        let res = limiter.check("10.0.0.1").await.unwrap();
        assert!(res.allowed);
        assert_eq!(res.remaining, 29);
        assert_eq!(res.reset_after, Duration::from_secs(u64::MAX));
        assert!(limiter.check("10.0.0.1").await.unwrap().allowed);
    }

    #[tokio::test]
    async fn sweeper_survives_oversized_window() {
        let limiter = Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            max_requests: 30,
            window: Duration::from_secs(u64::MAX),
        }));
        let handle = limiter.clone().spawn_sweeper();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        assert!(!handle.is_finished());
        handle.abort();
    }

    #[test]
    fn window_from_env_is_capped_at_one_day() {
        assert_eq!(window_from_secs(60), Duration::from_secs(60));
        assert_eq!(window_from_secs(u64::MAX), MAX_WINDOW);
    }

    #[test]
    fn default_config_is_thirty_per_minute() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 30);
        assert_eq!(config.window, Duration::from_secs(60));
    }
}
