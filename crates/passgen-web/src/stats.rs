//! In-memory generation counters. They reset on restart.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dto::StatsResponse;

/// Receives one `(count, timestamp)` event per successful generation.
///
/// Updates use relaxed atomics, so a concurrent snapshot may observe the
/// counters slightly out of step with each other.
#[derive(Debug, Default)]
pub struct GenerationStats {
    total_requests: AtomicU64,
    total_passwords_generated: AtomicU64,
    // f64 bits of the last unix timestamp; 0 until the first event.
    last_request_ts: AtomicU64,
}

impl GenerationStats {
    pub fn record(&self, count: usize, at: f64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_passwords_generated
            .fetch_add(count as u64, Ordering::Relaxed);
        self.last_request_ts.store(at.to_bits(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsResponse {
        let last = self.last_request_ts.load(Ordering::Relaxed);
        StatsResponse {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            total_passwords_generated: self.total_passwords_generated.load(Ordering::Relaxed),
            last_request_ts: (last != 0).then(|| f64::from_bits(last)),
        }
    }
}
