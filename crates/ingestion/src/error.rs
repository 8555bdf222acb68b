//! Ingestion error types

use contracts::{ContractError, ErrorKind};
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Validation or sensor failure
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// A concurrent poll unit panicked or was cancelled
    #[error("poll task for '{sensor_id}' failed: {message}")]
    PollTask {
        /// Sensor ID
        sensor_id: String,
        /// Error message
        message: String,
    },
}

impl IngestionError {
    pub fn poll_task(sensor_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PollTask {
            sensor_id: sensor_id.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Contract(e) => e.kind(),
            Self::PollTask { .. } => ErrorKind::Internal,
        }
    }
}

/// Ingestion Result alias
pub type Result<T> = std::result::Result<T, IngestionError>;
