//! Concrete sensor variants

mod fire;
mod traffic;

pub use fire::{FireSensor, TemperatureSampler};
pub use traffic::TrafficSensor;
