//! Per-client timestamp window.

use std::collections::VecDeque;

/// Admitted-request timestamps for one client, oldest first.
///
/// Entries are only dropped by [`ClientWindow::prune`]; nothing expires on
/// its own.
#[derive(Debug, Clone, Default)]
pub struct ClientWindow {
    stamps: VecDeque<f64>,
}

impl ClientWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every timestamp that fell out of the half-open window
    /// `(now - window, now]`.
    pub fn prune(&mut self, now: f64, window: f64) {
        while let Some(&oldest) = self.stamps.front() {
            if now - oldest >= window {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Appends `now`, keeping the sequence non-decreasing even if the clock
    /// stepped backwards.
    pub fn record(&mut self, now: f64) {
        let stamp = match self.stamps.back() {
            Some(&last) if last > now => last,
            _ => now,
        };
        self.stamps.push_back(stamp);
    }

    pub fn oldest(&self) -> Option<f64> {
        self.stamps.front().copied()
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
