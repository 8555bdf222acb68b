//! # Contracts
//!
//! Shared interface contracts for the sensor grid. Every business crate depends
//! on this crate only; reverse dependencies are prohibited.
//!
//! ## Units
//! - Temperatures are degrees Celsius (f64)
//! - Poll latency is seconds (f64) at API boundaries, `Duration` internally

mod alert;
mod device_id;
mod error;
pub mod keys;
mod reading;
mod sensor;
mod subscriber;

pub use alert::{AlertMessage, Severity};
pub use device_id::DeviceId;
pub use error::*;
pub use reading::{metric, Reading};
pub use sensor::{Sensor, SensorConstructor};
pub use subscriber::Subscriber;

/// Lowest physically possible temperature.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;
