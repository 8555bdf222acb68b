//! # Config Loader
//!
//! Grid configuration store and file loading.
//!
//! Responsibilities:
//! - Hold process-wide configuration values with defaults (`GridConfig`)
//! - Parse TOML/JSON override files
//! - Validate overrides before applying them
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("citypulse.toml")).unwrap();
//! println!("threshold: {}", config.fire_threshold_celsius().unwrap());
//! ```

mod file;
mod parser;
mod store;
mod validator;

pub use file::GridConfigFile;
pub use parser::ConfigFormat;
pub use store::{ConfigValue, GridConfig, DEFAULT_API_ENDPOINT, DEFAULT_FIRE_THRESHOLD_CELSIUS};

use contracts::ContractError;
use std::path::Path;
use tracing::info;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file on top of the defaults
    ///
    /// Format is detected from the extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<GridConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&content, format)?;
        info!(path = %path.display(), "grid config loaded");
        Ok(config)
    }

    /// Load config from a string on top of the defaults
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<GridConfig, ContractError> {
        let config = GridConfig::new();
        Self::apply_str(&config, content, format)?;
        Ok(config)
    }

    /// Parse, validate and apply overrides to an existing store
    pub fn apply_str(
        config: &GridConfig,
        content: &str,
        format: ConfigFormat,
    ) -> Result<(), ContractError> {
        let file = parser::parse(content, format)?;
        validator::validate(&file)?;
        config.extend(file.into_entries());
        Ok(())
    }

    /// Serialize the current store to TOML
    pub fn to_toml(config: &GridConfig) -> Result<String, ContractError> {
        let file = GridConfigFile::from_snapshot(&config.snapshot());
        toml::to_string_pretty(&file)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }
}
