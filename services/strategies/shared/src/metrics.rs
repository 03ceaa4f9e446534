//! Strategy metrics collection

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Snapshot of one run's counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetrics {
    pub pairs_evaluated: u64,
    pub pairs_skipped: u64,
    pub candle_requests: u64,
    pub fetch_failures: u64,
    pub signals_emitted: u64,
    pub notifications_failed: u64,
}

/// Thread-safe metrics collector shared by concurrent pair evaluations
#[derive(Debug)]
pub struct MetricsCollector {
    start_time: Instant,
    pairs_evaluated: AtomicU64,
    pairs_skipped: AtomicU64,
    candle_requests: AtomicU64,
    fetch_failures: AtomicU64,
    signals_emitted: AtomicU64,
    notifications_failed: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            pairs_evaluated: AtomicU64::new(0),
            pairs_skipped: AtomicU64::new(0),
            candle_requests: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            signals_emitted: AtomicU64::new(0),
            notifications_failed: AtomicU64::new(0),
        }
    }

    pub fn increment_evaluated(&self) {
        self.pairs_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_skipped(&self) {
        self.pairs_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests(&self) {
        self.candle_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_fetch_failures(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_signals(&self) {
        self.signals_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_notification_failures(&self) {
        self.notifications_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self) -> RunMetrics {
        RunMetrics {
            pairs_evaluated: self.pairs_evaluated.load(Ordering::Relaxed),
            pairs_skipped: self.pairs_skipped.load(Ordering::Relaxed),
            candle_requests: self.candle_requests.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            signals_emitted: self.signals_emitted.load(Ordering::Relaxed),
            notifications_failed: self.notifications_failed.load(Ordering::Relaxed),
        }
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
