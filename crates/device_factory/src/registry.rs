//! SensorTypeRegistry - name -> constructor catalog
//!
//! Every concrete sensor type is declared once in [`BUILTIN_SENSORS`] and is
//! available from any registry built with [`SensorTypeRegistry::with_builtins`].
//! Types needing extra dependencies are registered with a closure that
//! captures them, so the factory still only passes a device id.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use config_loader::GridConfig;
use contracts::{ContractError, DeviceId, Sensor, SensorConstructor};
use dispatcher::AlertDispatcher;
use tracing::{debug, warn};

use crate::sensors::{FireSensor, TrafficSensor};
use crate::Result;

/// A sensor type constructible from a device id alone
pub trait RegisteredSensor: Sensor + Sized + 'static {
    /// Registry key
    const TYPE_NAME: &'static str;

    fn construct(device_id: DeviceId) -> Self;
}

type BuiltinConstructor = fn(DeviceId) -> Box<dyn Sensor>;

/// Sensor types available in every registry built with `with_builtins`
pub const BUILTIN_SENSORS: &[(&str, BuiltinConstructor)] =
    &[(TrafficSensor::TYPE_NAME, boxed::<TrafficSensor>)];

fn boxed<T: RegisteredSensor>(device_id: DeviceId) -> Box<dyn Sensor> {
    Box::new(T::construct(device_id))
}

/// Sensor type registry
///
/// Read-mostly: lookups take a shared lock, registration an exclusive one.
/// Registering a name twice replaces the previous constructor.
#[derive(Default)]
pub struct SensorTypeRegistry {
    constructors: RwLock<HashMap<String, SensorConstructor>>,
}

impl SensorTypeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every builtin type
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for (name, ctor) in BUILTIN_SENSORS {
            let ctor = *ctor;
            registry.register(*name, Arc::new(ctor));
        }
        registry
    }

    /// Store or replace the constructor for `name`
    ///
    /// Returns the replaced constructor, if any.
    pub fn register(
        &self,
        name: impl Into<String>,
        constructor: SensorConstructor,
    ) -> Option<SensorConstructor> {
        let name = name.into();
        let previous = self
            .constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.clone(), constructor);

        if previous.is_some() {
            warn!(sensor_type = %name, "sensor type re-registered, previous constructor replaced");
        } else {
            debug!(sensor_type = %name, "sensor type registered");
        }
        previous
    }

    /// Register a [`RegisteredSensor`] under its `TYPE_NAME`
    pub fn register_type<T: RegisteredSensor>(&self) -> Option<SensorConstructor> {
        self.register(T::TYPE_NAME, Arc::new(boxed::<T>))
    }

    /// Register `FireSensor`, bound to the given dispatcher and config
    pub fn register_alerting(
        &self,
        dispatcher: Arc<AlertDispatcher>,
        config: Arc<GridConfig>,
    ) -> Option<SensorConstructor> {
        self.register(
            FireSensor::TYPE_NAME,
            Arc::new(move |device_id: DeviceId| -> Box<dyn Sensor> {
                Box::new(FireSensor::new(
                    device_id,
                    Arc::clone(&dispatcher),
                    Arc::clone(&config),
                ))
            }),
        )
    }

    /// Constructor for `name`
    ///
    /// # Errors
    /// `UnknownSensorType` if `name` was never registered.
    pub fn get(&self, name: &str) -> Result<SensorConstructor> {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ContractError::unknown_sensor_type(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Snapshot of every registered name
    pub fn list_registered(&self) -> BTreeSet<String> {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for SensorTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorTypeRegistry")
            .field("types", &self.list_registered())
            .finish()
    }
}
