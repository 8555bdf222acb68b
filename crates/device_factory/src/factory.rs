//! DeviceFactory - builds sensors from the type registry

use std::sync::Arc;

use contracts::{ContractError, DeviceId, Sensor};
use tracing::{info, instrument, warn};

use crate::registry::SensorTypeRegistry;
use crate::Result;

/// Device Factory
///
/// Looks a type name up in the registry and constructs an instance bound to
/// a device id. Created sensors are handed to the caller; the factory keeps no
/// reference to them.
#[derive(Debug, Clone)]
pub struct DeviceFactory {
    registry: Arc<SensorTypeRegistry>,
}

impl DeviceFactory {
    pub fn new(registry: Arc<SensorTypeRegistry>) -> Self {
        Self { registry }
    }

    /// Registry this factory reads from
    pub fn registry(&self) -> &Arc<SensorTypeRegistry> {
        &self.registry
    }

    /// Create a sensor of `type_name` bound to `device_id`
    ///
    /// # Errors
    /// - `InvalidArgument` if either argument is empty
    /// - `UnknownSensorType` if `type_name` is not registered
    #[instrument(name = "device_factory_create_device", skip(self))]
    pub fn create_device(&self, type_name: &str, device_id: &str) -> Result<Box<dyn Sensor>> {
        if type_name.is_empty() {
            return Err(ContractError::invalid_argument(
                "sensor_type",
                "must be provided",
            ));
        }
        let device_id = DeviceId::new(device_id)?;

        let constructor = self.registry.get(type_name).inspect_err(|_| {
            warn!(sensor_type = type_name, "unknown sensor type requested");
        })?;

        let sensor = constructor(device_id);
        metrics::counter!("citypulse_devices_created_total", "sensor_type" => type_name.to_string())
            .increment(1);
        info!(
            sensor_type = sensor.type_name(),
            device_id = %sensor.device_id(),
            "device created"
        );
        Ok(sensor)
    }

    /// Same as [`create_device`](Self::create_device) but returns a shareable handle
    pub fn create_shared(&self, type_name: &str, device_id: &str) -> Result<Arc<dyn Sensor>> {
        self.create_device(type_name, device_id).map(Arc::from)
    }
}
