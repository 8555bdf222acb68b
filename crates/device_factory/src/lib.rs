//! # Device Factory
//!
//! Sensor catalog and construction.
//!
//! Responsibilities:
//! - Keep the name -> constructor catalog (`SensorTypeRegistry`)
//! - Build sensor instances bound to a device id (`DeviceFactory`)
//! - Provide the concrete sensor variants (`TrafficSensor`, `FireSensor`)
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use device_factory::{DeviceFactory, SensorTypeRegistry};
//!
//! let registry = Arc::new(SensorTypeRegistry::with_builtins());
//! let factory = DeviceFactory::new(registry);
//! let sensor = factory.create_device("TrafficSensor", "TRAFFIC-001").unwrap();
//! assert!(sensor.health_check());
//! ```

pub mod factory;
pub mod registry;
pub mod sensors;

pub use contracts::{ContractError, DeviceId, Reading, Sensor, SensorConstructor};
pub use factory::DeviceFactory;
pub use registry::{RegisteredSensor, SensorTypeRegistry};
pub use sensors::{FireSensor, TemperatureSampler, TrafficSensor};

/// Result alias
pub type Result<T> = std::result::Result<T, ContractError>;
