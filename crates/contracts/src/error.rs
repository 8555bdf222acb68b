//! Layered error definitions
//!
//! Categorized by source: input / registry / invariant / subscriber / config

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Input Errors =====
    /// Caller supplied an unusable argument (empty id, negative delay, empty batch)
    #[error("invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    // ===== Registry Errors =====
    /// Factory lookup miss
    #[error("unknown sensor type: {name}")]
    UnknownSensorType { name: String },

    // ===== Invariant Errors =====
    /// Physically impossible state, e.g. a temperature below absolute zero
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    // ===== Subscriber Errors =====
    /// A subscriber failed while handling an alert
    #[error("subscriber '{subscriber}' failed: {message}")]
    Subscriber { subscriber: String, message: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification used to pick a recovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reject the request; retrying with the same input will fail again.
    BadInput,
    /// The requested sensor type is not in the catalog.
    UnknownType,
    /// Something inside the system broke; alert the operator.
    Internal,
}

impl ContractError {
    /// Create invalid argument error
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unknown sensor type error
    pub fn unknown_sensor_type(name: impl Into<String>) -> Self {
        Self::UnknownSensorType { name: name.into() }
    }

    /// Create invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create subscriber failure error
    pub fn subscriber(subscriber: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Subscriber {
            subscriber: subscriber.into(),
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigValidation { .. } => ErrorKind::BadInput,
            Self::UnknownSensorType { .. } => ErrorKind::UnknownType,
            Self::InvariantViolation { .. }
            | Self::Subscriber { .. }
            | Self::Io(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }
}
