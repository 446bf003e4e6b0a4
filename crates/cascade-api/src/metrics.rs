//! Lock-free operation counters, surfaced on `/api/stats`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters for the Cascade HTTP surface.
pub struct OperationMetrics {
    /// Maximization/minimization runs.
    pub run_count: AtomicU64,
    /// Session-resolving follow-ups (final state, animations, paths).
    pub followup_count: AtomicU64,
    /// Community analyses.
    pub analysis_count: AtomicU64,
    /// Session-free ad-hoc evaluations.
    pub adhoc_count: AtomicU64,
    /// Requests that ended in any error.
    pub error_count: AtomicU64,

    pub start_time: Instant,
}

impl OperationMetrics {
    pub fn new() -> Self {
        Self {
            run_count: AtomicU64::new(0),
            followup_count: AtomicU64::new(0),
            analysis_count: AtomicU64::new(0),
            adhoc_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn inc(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn load(&self, counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for OperationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let m = OperationMetrics::new();
        assert_eq!(m.load(&m.run_count), 0);
        m.inc(&m.run_count);
        m.inc(&m.run_count);
        assert_eq!(m.load(&m.run_count), 2);
        assert_eq!(m.load(&m.error_count), 0);
    }
}
