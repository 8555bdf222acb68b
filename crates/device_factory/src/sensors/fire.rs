//! FireSensor - temperature sensor with threshold alerting

use std::fmt;
use std::sync::Arc;

use config_loader::GridConfig;
use contracts::{
    metric, AlertMessage, ContractError, DeviceId, Reading, Sensor, ABSOLUTE_ZERO_CELSIUS,
};
use dispatcher::AlertDispatcher;
use rand::Rng;
use tracing::{debug, warn};

use crate::Result;

/// Lower bound of simulated temperatures (degrees Celsius)
pub const MIN_SAMPLE_CELSIUS: f64 = 20.0;
/// Upper bound of simulated temperatures (degrees Celsius)
pub const MAX_SAMPLE_CELSIUS: f64 = 120.0;

/// Source of raw temperature samples
pub type TemperatureSampler = Box<dyn Fn() -> f64 + Send + Sync>;

/// Fire / temperature sensor
///
/// Each read samples a temperature and, if it is strictly above the
/// configured `fire_threshold_celsius`, broadcasts one critical alert before
/// returning the reading.
pub struct FireSensor {
    device_id: DeviceId,
    dispatcher: Arc<AlertDispatcher>,
    config: Arc<GridConfig>,
    sampler: TemperatureSampler,
}

impl FireSensor {
    /// Sensor drawing uniformly from `[20.0, 120.0]` °C
    pub fn new(
        device_id: DeviceId,
        dispatcher: Arc<AlertDispatcher>,
        config: Arc<GridConfig>,
    ) -> Self {
        Self::with_sampler(
            device_id,
            dispatcher,
            config,
            Box::new(|| rand::rng().random_range(MIN_SAMPLE_CELSIUS..=MAX_SAMPLE_CELSIUS)),
        )
    }

    /// Sensor with a custom temperature source
    pub fn with_sampler(
        device_id: DeviceId,
        dispatcher: Arc<AlertDispatcher>,
        config: Arc<GridConfig>,
        sampler: TemperatureSampler,
    ) -> Self {
        Self {
            device_id,
            dispatcher,
            config,
            sampler,
        }
    }

    pub const TYPE_NAME: &'static str = "FireSensor";

    /// Turn one temperature sample into a reading, alerting on breach
    fn evaluate(&self, temperature: f64) -> Result<Reading> {
        if temperature.is_nan() || temperature < ABSOLUTE_ZERO_CELSIUS {
            return Err(ContractError::invariant(format!(
                "invalid temperature {temperature} °C from {}: below absolute zero",
                self.device_id
            )));
        }

        let threshold = self.config.fire_threshold_celsius()?;

        if temperature > threshold {
            let alert = AlertMessage::critical(format!(
                "FIRE ALERT from {}: {temperature:.2} °C",
                self.device_id
            ));
            warn!(
                device_id = %self.device_id,
                temperature,
                threshold,
                "fire threshold exceeded"
            );
            self.dispatcher.notify_all(&alert)?;
        } else {
            debug!(device_id = %self.device_id, temperature, "temperature nominal");
        }

        Ok(Reading::from_device(
            self.device_id.clone(),
            [(metric::TEMPERATURE_CELSIUS, temperature)],
        ))
    }
}

impl Sensor for FireSensor {
    fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn read(&self) -> Result<Reading> {
        self.evaluate((self.sampler)())
    }

    fn health_check(&self) -> bool {
        true
    }
}

impl fmt::Debug for FireSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FireSensor")
            .field("device_id", &self.device_id)
            .finish_non_exhaustive()
    }
}
