//! GridConfigFile - on-disk override format

use std::collections::{BTreeMap, HashMap};

use contracts::keys;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::ConfigValue;

/// Configuration overrides read from a TOML/JSON file
///
/// Every field is optional; absent fields keep the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct GridConfigFile {
    /// Fire alert threshold (degrees Celsius)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -273.15, max = 10000.0))]
    pub fire_threshold_celsius: Option<f64>,

    /// Upstream API endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub api_endpoint: Option<String>,

    /// Free-form extra keys
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, ConfigValue>,
}

impl GridConfigFile {
    /// Rebuild the file form of a store snapshot
    pub fn from_snapshot(values: &HashMap<String, ConfigValue>) -> Self {
        let mut file = Self::default();
        for (key, value) in values {
            match key.as_str() {
                keys::FIRE_THRESHOLD_CELSIUS if value.as_f64().is_some() => {
                    file.fire_threshold_celsius = value.as_f64();
                }
                keys::API_ENDPOINT if value.as_str().is_some() => {
                    file.api_endpoint = value.as_str().map(String::from);
                }
                _ => {
                    file.extra.insert(key.clone(), value.clone());
                }
            }
        }
        file
    }

    /// Flatten into (key, value) pairs ready for `GridConfig::extend`
    pub fn into_entries(self) -> Vec<(String, ConfigValue)> {
        let mut entries: Vec<(String, ConfigValue)> = self.extra.into_iter().collect();

        if let Some(threshold) = self.fire_threshold_celsius {
            entries.push((
                keys::FIRE_THRESHOLD_CELSIUS.to_string(),
                ConfigValue::Float(threshold),
            ));
        }
        if let Some(endpoint) = self.api_endpoint {
            entries.push((keys::API_ENDPOINT.to_string(), ConfigValue::Text(endpoint)));
        }

        entries
    }
}
