//! # Ingestion Pipeline
//!
//! Sensor data ingestion module.
//!
//! Responsibilities:
//! - Simulate per-sensor environmental data streams
//! - Poll one sensor with simulated network latency
//! - Fan out batch polls concurrently, returning results in input order
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::IngestionPipeline;
//!
//! let pipeline = IngestionPipeline::new();
//! let readings = pipeline.poll_many(&["A", "B", "C"], 0.1).await?;
//! assert_eq!(readings.len(), 3);
//! ```

mod config;
mod error;
mod pipeline;
mod simulator;

// Re-exports
pub use config::{delay_from_secs, IngestionMetrics, MetricsSnapshot, DEFAULT_POLL_DELAY};
pub use contracts::Reading;
pub use error::{IngestionError, Result};
pub use pipeline::IngestionPipeline;
pub use simulator::{SensorStreamSimulator, CO2_RANGE, HUMIDITY_RANGE, TEMPERATURE_RANGE};
