//! Dispatcher metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one dispatcher
#[derive(Debug, Default)]
pub struct DispatcherMetrics {
    /// Total `notify_all` calls
    broadcast_count: AtomicU64,
    /// Total successful subscriber deliveries
    delivery_count: AtomicU64,
    /// Total subscriber failures
    failure_count: AtomicU64,
}

impl DispatcherMetrics {
    pub fn broadcast_count(&self) -> u64 {
        self.broadcast_count.load(Ordering::Relaxed)
    }

    pub fn inc_broadcast_count(&self) {
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("citypulse_alerts_total").increment(1);
    }

    pub fn delivery_count(&self) -> u64 {
        self.delivery_count.load(Ordering::Relaxed)
    }

    pub fn inc_delivery_count(&self) {
        self.delivery_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("citypulse_alert_delivery_failures_total").increment(1);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            broadcast_count: self.broadcast_count(),
            delivery_count: self.delivery_count(),
            failure_count: self.failure_count(),
        }
    }
}

/// Snapshot of dispatcher metrics (for reporting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub broadcast_count: u64,
    pub delivery_count: u64,
    pub failure_count: u64,
}
