//! GridConfig - process-wide configuration store
//!
//! One instance is created at startup and shared through `Arc` with every
//! component that needs it. Reads clone an `Arc` snapshot under a short read
//! lock; writes replace the whole map (copy-on-write) under the write lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use contracts::{keys, ContractError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default fire alert threshold (degrees Celsius)
pub const DEFAULT_FIRE_THRESHOLD_CELSIUS: f64 = 80.0;

/// Default upstream API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.citypulse.local";

/// A single configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    /// Numeric view (integers widen to f64)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

type ConfigMap = HashMap<String, ConfigValue>;

/// Grid configuration store
pub struct GridConfig {
    values: RwLock<Arc<ConfigMap>>,
}

impl GridConfig {
    /// Create a store seeded with the built-in defaults
    pub fn new() -> Self {
        Self {
            values: RwLock::new(Arc::new(Self::defaults())),
        }
    }

    /// Built-in defaults
    pub fn defaults() -> HashMap<String, ConfigValue> {
        HashMap::from([
            (
                keys::FIRE_THRESHOLD_CELSIUS.to_string(),
                ConfigValue::Float(DEFAULT_FIRE_THRESHOLD_CELSIUS),
            ),
            (
                keys::API_ENDPOINT.to_string(),
                ConfigValue::Text(DEFAULT_API_ENDPOINT.to_string()),
            ),
        ])
    }

    /// Current value for `key`, or `None` if neither set nor defaulted
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.snapshot().get(key).cloned()
    }

    /// Typed numeric accessor
    ///
    /// # Errors
    /// `ConfigValidation` if the key is missing or not numeric.
    pub fn get_f64(&self, key: &str) -> Result<f64, ContractError> {
        match self.get(key) {
            Some(value) => value.as_f64().ok_or_else(|| {
                ContractError::config_validation(key, format!("expected a number, got '{value}'"))
            }),
            None => Err(ContractError::config_validation(key, "no value configured")),
        }
    }

    /// Fire alert threshold in degrees Celsius
    ///
    /// # Errors
    /// `ConfigValidation` if the stored value is missing, not numeric or not finite.
    pub fn fire_threshold_celsius(&self) -> Result<f64, ContractError> {
        let threshold = self.get_f64(keys::FIRE_THRESHOLD_CELSIUS)?;
        if !threshold.is_finite() {
            return Err(ContractError::config_validation(
                keys::FIRE_THRESHOLD_CELSIUS,
                format!("must be a finite number, got {threshold}"),
            ));
        }
        Ok(threshold)
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, value = %value, "config value set");

        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ConfigMap::clone(&guard);
        next.insert(key, value);
        *guard = Arc::new(next);
    }

    /// Set several values in one atomic swap
    pub fn extend<I>(&self, values: I)
    where
        I: IntoIterator<Item = (String, ConfigValue)>,
    {
        let mut guard = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ConfigMap::clone(&guard);
        next.extend(values);
        *guard = Arc::new(next);
    }

    /// Point-in-time view of every value
    ///
    /// Later writes are not visible through the returned map.
    pub fn snapshot(&self) -> Arc<ConfigMap> {
        Arc::clone(&self.values.read().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfig")
            .field("values", &self.snapshot())
            .finish()
    }
}
