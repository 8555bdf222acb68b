//! Ingestion configuration and metrics

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use contracts::ContractError;

/// Default simulated network latency
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_millis(100);

/// Convert a latency in seconds into a `Duration`
///
/// # Errors
/// `InvalidArgument` if `secs` is negative, not finite, or too large for a `Duration`.
pub fn delay_from_secs(secs: f64) -> Result<Duration, ContractError> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(ContractError::invalid_argument(
            "delay",
            format!("must be a non-negative number of seconds, got {secs}"),
        ));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| {
        ContractError::invalid_argument("delay", format!("{secs} seconds is out of range: {e}"))
    })
}

/// Ingestion metrics
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Total successful polls
    pub polls_completed: AtomicU64,

    /// Total failed polls
    pub polls_failed: AtomicU64,

    /// Total batch operations
    pub batches: AtomicU64,
}

impl IngestionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_completed(&self) {
        self.polls_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.polls_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            polls_completed: self.polls_completed.load(Ordering::Relaxed),
            polls_failed: self.polls_failed.load(Ordering::Relaxed),
            batches: self.batches.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub polls_completed: u64,
    pub polls_failed: u64,
    pub batches: u64,
}
