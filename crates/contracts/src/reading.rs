//! Reading - one poll result
//!
//! Flat mapping from metric name to numeric value, optionally tagged with the
//! originating device.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DeviceId;

/// Well-known metric names
pub mod metric {
    pub const CARS_PER_MIN: &str = "cars_per_min";
    pub const TEMPERATURE_CELSIUS: &str = "temperature_celsius";
    pub const HUMIDITY_PERCENT: &str = "humidity_percent";
    pub const CO2_PPM: &str = "co2_ppm";
}

/// Sensor reading
///
/// Immutable once built. Metrics are kept sorted by name so that logs and
/// serialized output are stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<DeviceId>,
    metrics: BTreeMap<String, f64>,
}

impl Reading {
    /// Create an untagged reading from (name, value) pairs
    pub fn new<I, K>(metrics: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            source: None,
            metrics: metrics.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Tag the reading with its originating device
    pub fn from_device<I, K>(source: DeviceId, metrics: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            source: Some(source),
            ..Self::new(metrics)
        }
    }

    /// Originating device, if tagged
    pub fn source(&self) -> Option<&DeviceId> {
        self.source.as_ref()
    }

    /// Value of a single metric
    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// All metrics
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
