//! Simulated sensor data stream
//!
//! Infinite source of environmental readings keyed by sensor id. Independent
//! of the sensor type registry.

use std::ops::RangeInclusive;

use contracts::{metric, DeviceId, Reading};
use rand::Rng;

use crate::error::Result;

/// Temperature range (degrees Celsius)
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 15.0..=100.0;
/// Relative humidity range (percent)
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 10.0..=90.0;
/// CO2 concentration range (ppm)
pub const CO2_RANGE: RangeInclusive<f64> = 300.0..=2000.0;

/// Endless stream of random readings for one sensor
///
/// `next()` never returns `None`.
#[derive(Debug, Clone)]
pub struct SensorStreamSimulator {
    sensor_id: DeviceId,
}

impl SensorStreamSimulator {
    /// # Errors
    /// `InvalidArgument` if `sensor_id` is empty.
    pub fn new(sensor_id: &str) -> Result<Self> {
        Ok(Self::for_device(DeviceId::new(sensor_id)?))
    }

    pub fn for_device(sensor_id: DeviceId) -> Self {
        Self { sensor_id }
    }

    pub fn sensor_id(&self) -> &DeviceId {
        &self.sensor_id
    }

    /// Produce one reading
    pub fn sample(&self) -> Reading {
        let mut rng = rand::rng();
        Reading::from_device(
            self.sensor_id.clone(),
            [
                (metric::TEMPERATURE_CELSIUS, rng.random_range(TEMPERATURE_RANGE)),
                (metric::HUMIDITY_PERCENT, rng.random_range(HUMIDITY_RANGE)),
                (metric::CO2_PPM, rng.random_range(CO2_RANGE)),
            ],
        )
    }
}

impl Iterator for SensorStreamSimulator {
    type Item = Reading;

    fn next(&mut self) -> Option<Reading> {
        Some(self.sample())
    }
}
