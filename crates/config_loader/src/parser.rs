//! Config file parsing
//!
//! TOML (primary) and JSON.

use contracts::ContractError;

use crate::file::GridConfigFile;

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn parse_toml(content: &str) -> Result<GridConfigFile, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<GridConfigFile, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<GridConfigFile, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigValue;

    #[test]
    fn test_parse_toml() {
        let content = r#"
fire_threshold_celsius = 85.0
api_endpoint = "https://grid.example"

[extra]
region = "north"
poll_batch = 100
"#;
        let file = parse_toml(content).unwrap();
        assert_eq!(file.fire_threshold_celsius, Some(85.0));
        assert_eq!(file.api_endpoint.as_deref(), Some("https://grid.example"));
        assert_eq!(file.extra["region"], ConfigValue::Text("north".into()));
        assert_eq!(file.extra["poll_batch"], ConfigValue::Int(100));
    }

    #[test]
    fn test_parse_json() {
        let file = parse_json(r#"{ "fire_threshold_celsius": 72 }"#).unwrap();
        assert_eq!(file.fire_threshold_celsius, Some(72.0));
        assert!(file.extra.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_toml("fire_threshold_celsius = \"hot\"").unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
