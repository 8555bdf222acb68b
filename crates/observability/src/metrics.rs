//! Reading statistics
//!
//! Running per-metric statistics over polled readings, plus the gauge/histogram
//! feed for the metrics facade.

use std::collections::BTreeMap;
use std::fmt;

use contracts::Reading;
use metrics::{gauge, histogram};

/// Publish every value of `reading` to the metrics facade
///
/// Labelled by metric name and, when known, device id.
pub fn record_reading(reading: &Reading) {
    let device = reading
        .source()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    for (name, value) in reading.metrics() {
        gauge!(
            "citypulse_reading_value",
            "metric" => name.clone(),
            "device_id" => device.clone()
        )
        .set(*value);
        histogram!("citypulse_reading_value_hist", "metric" => name.clone()).record(*value);
    }
}

/// Per-metric aggregation in memory, for end-of-run summaries
#[derive(Debug, Clone, Default)]
pub struct ReadingStatsAggregator {
    pub total_readings: u64,
    /// Readings without a source device
    pub anonymous_readings: u64,
    per_metric: BTreeMap<String, RunningStats>,
}

impl ReadingStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, reading: &Reading) {
        self.total_readings += 1;
        if reading.source().is_none() {
            self.anonymous_readings += 1;
        }
        for (name, value) in reading.metrics() {
            self.per_metric.entry(name.clone()).or_default().push(*value);
        }
    }

    pub fn summary(&self) -> StatsReport {
        StatsReport {
            total_readings: self.total_readings,
            anonymous_readings: self.anonymous_readings,
            metrics: self
                .per_metric
                .iter()
                .map(|(name, stats)| (name.clone(), StatsSummary::from(stats)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsReport {
    pub total_readings: u64,
    pub anonymous_readings: u64,
    pub metrics: BTreeMap<String, StatsSummary>,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Reading Summary ===")?;
        writeln!(f, "Total readings: {}", self.total_readings)?;
        if self.anonymous_readings > 0 {
            writeln!(f, "Without source: {}", self.anonymous_readings)?;
        }
        for (name, stats) in &self.metrics {
            writeln!(f, "{name}: {stats}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.2}, max={:.2}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online mean / variance (Welford)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
            return;
        }

        self.min = self.min.min(value);
        self.max = self.max.max(value);
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
