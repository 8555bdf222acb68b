//! Sensor trait - the capability every sensor type implements

use std::sync::Arc;

use crate::{ContractError, DeviceId, Reading};

/// Constructor stored in the sensor type registry
///
/// Takes the device identifier and returns a fresh sensor instance. Types that
/// need extra dependencies capture them in the closure.
pub type SensorConstructor = Arc<dyn Fn(DeviceId) -> Box<dyn Sensor> + Send + Sync>;

/// Sensor capability
///
/// Implemented by every concrete sensor variant.
///
/// # Contract
///
/// - `read` produces one reading and sends at most one alert
/// - `health_check` is cheap and has no side effects
pub trait Sensor: Send + Sync {
    /// Device identifier this instance is bound to
    fn device_id(&self) -> &DeviceId;

    /// Registered type name of the variant
    fn type_name(&self) -> &'static str;

    /// Take one reading
    ///
    /// # Errors
    /// `InvariantViolation` if the measured value is physically impossible.
    fn read(&self) -> Result<Reading, ContractError>;

    /// Liveness probe
    fn health_check(&self) -> bool;
}
