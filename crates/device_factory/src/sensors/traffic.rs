//! TrafficSensor - simulated vehicle counter

use contracts::{metric, DeviceId, Reading, Sensor};
use rand::Rng;
use tracing::trace;

use crate::registry::RegisteredSensor;
use crate::Result;

/// Upper bound (inclusive) of simulated vehicles per minute
pub const MAX_CARS_PER_MIN: u32 = 200;

/// Traffic density sensor
///
/// Each read draws a uniform vehicle count in `[0, 200]`.
#[derive(Debug, Clone)]
pub struct TrafficSensor {
    device_id: DeviceId,
}

impl TrafficSensor {
    pub fn new(device_id: DeviceId) -> Self {
        Self { device_id }
    }
}

impl RegisteredSensor for TrafficSensor {
    const TYPE_NAME: &'static str = "TrafficSensor";

    fn construct(device_id: DeviceId) -> Self {
        Self::new(device_id)
    }
}

impl Sensor for TrafficSensor {
    fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn read(&self) -> Result<Reading> {
        let cars = rand::rng().random_range(0..=MAX_CARS_PER_MIN);
        trace!(device_id = %self.device_id, cars, "traffic reading");
        Ok(Reading::from_device(
            self.device_id.clone(),
            [(metric::CARS_PER_MIN, f64::from(cars))],
        ))
    }

    fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_in_range() {
        let sensor = TrafficSensor::new(DeviceId::new("TRAFFIC-001").unwrap());
        for _ in 0..500 {
            let reading = sensor.read().unwrap();
            let cars = reading.get(metric::CARS_PER_MIN).unwrap();
            assert!((0.0..=200.0).contains(&cars));
            assert_eq!(cars.fract(), 0.0);
            assert_eq!(reading.source().unwrap(), "TRAFFIC-001");
        }
    }

    #[test]
    fn test_health_check() {
        let sensor = TrafficSensor::new(DeviceId::new("T").unwrap());
        assert!(sensor.health_check());
    }
}
