//! # Analytics
//!
//! Services the grid core hands batches of readings to.
//!
//! - Composite heatmap index over temperature / humidity / CO2
//! - Per-minute resampling of timestamped readings
//! - Transmission strategies (full vs. compressed links)
//! - Weak-reference device cache

mod cache;
mod index;
mod resample;
mod strategy;

pub use cache::SensorCache;
pub use index::{heatmap_index, heatmap_index_for};
pub use resample::{resample_per_minute, MinuteAggregate, TimedReading};
pub use strategy::{LoRaWanStrategy, TransmissionStrategy, WiFiStrategy};

/// Result alias
pub type Result<T> = std::result::Result<T, contracts::ContractError>;
