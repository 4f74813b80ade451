//! Sliding-window admission control, one window per client identity.
//!
//! [`RateLimiter::check`] prunes the caller's window, compares what is left
//! against the tier's ceiling and either records the request or reports how
//! long the caller has to wait. Each identity has its own mutex, so two
//! checks for the same client never interleave while checks for different
//! clients proceed in parallel.

pub mod tier;
pub mod window;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;

use crate::config::LimiterConfig;
use crate::error::{CoreError, CoreResult};

pub use tier::Tier;
pub use window::ClientWindow;

type Bucket = Arc<Mutex<ClientWindow>>;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub admitted: bool,
    pub retry_after_seconds: Option<u64>,
}

impl RateLimitDecision {
    fn admit() -> Self {
        Self {
            admitted: true,
            retry_after_seconds: None,
        }
    }

    fn reject(retry_after_seconds: u64) -> Self {
        Self {
            admitted: false,
            retry_after_seconds: Some(retry_after_seconds),
        }
    }

    /// Converts a rejection into [`CoreError::RateLimitExceeded`].
    pub fn into_result(self) -> CoreResult<()> {
        if self.admitted {
            Ok(())
        } else {
            Err(CoreError::RateLimitExceeded {
                retry_after_seconds: self.retry_after_seconds.unwrap_or(0),
            })
        }
    }
}

/// Per-identity sliding-window rate limiter.
///
/// Owned by the service state and shared behind an `Arc`; there is no
/// process-wide instance.
pub struct RateLimiter {
    config: LimiterConfig,
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            config,
            buckets: DashMap::new(),
        }
    }

    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Ceiling for `tier` within one window.
    pub fn limit_for(&self, tier: Tier) -> usize {
        match tier {
            Tier::Standard => self.config.standard_limit,
            Tier::Trusted => self.config.trusted_limit,
        }
    }

    /// Admits or rejects one request from `identity` at unix time `now`.
    ///
    /// An unknown identity (including the empty string) starts with an empty
    /// window. Admitted requests are recorded; rejected ones are not.
    pub fn check(&self, identity: &str, tier: Tier, now: f64) -> RateLimitDecision {
        let window = self.config.window_seconds as f64;
        let limit = self.limit_for(tier);

        let bucket = self.bucket(identity);
        let mut stamps = lock(&bucket);
        stamps.prune(now, window);

        if stamps.len() >= limit {
            let retry_after = stamps
                .oldest()
                .map_or(0, |oldest| retry_after_seconds(window, now, oldest));
            tracing::debug!(
                "Rate limit hit: identity={identity}, tier={}, in_window={}, retry_after={retry_after}",
                tier.as_str(),
                stamps.len()
            );
            return RateLimitDecision::reject(retry_after);
        }

        stamps.record(now);
        RateLimitDecision::admit()
    }

    /// Prunes every window and forgets clients whose window is now empty.
    ///
    /// Buckets that an in-flight [`check`](Self::check) is holding are left
    /// alone. Returns the number of buckets removed.
    pub fn sweep(&self, now: f64) -> usize {
        let window = self.config.window_seconds as f64;
        let mut removed = 0;
        self.buckets.retain(|_, bucket| {
            if Arc::strong_count(bucket) > 1 {
                return true;
            }
            let mut stamps = lock(bucket);
            stamps.prune(now, window);
            let keep = !stamps.is_empty();
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!(
                "Rate limiter sweep removed {removed} idle client(s), {} remain",
                self.buckets.len()
            );
        }
        removed
    }

    /// Number of client identities currently holding a bucket.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }

    // The shard lock is only held while the handle is cloned, so the sweep's
    // strong-count check sees every outstanding handle.
    fn bucket(&self, identity: &str) -> Bucket {
        if let Some(existing) = self.buckets.get(identity) {
            return Arc::clone(existing.value());
        }
        let entry = self.buckets.entry(identity.to_string()).or_default();
        Arc::clone(entry.value())
    }
}

fn lock(bucket: &Bucket) -> MutexGuard<'_, ClientWindow> {
    bucket.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Seconds until `oldest` leaves the window, rounded up.
fn retry_after_seconds(window: f64, now: f64, oldest: f64) -> u64 {
    (window - (now - oldest)).ceil().max(0.0) as u64
}

/// Current unix time in fractional seconds.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}
