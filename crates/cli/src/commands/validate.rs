//! `validate` command implementation.

use anyhow::{Context, Result};
use config_loader::{ConfigLoader, GridConfig};
use contracts::keys;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    fire_threshold_celsius: f64,
    api_endpoint: String,
    extra_keys: Vec<String>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.file.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.file.display().to_string();

    if !args.file.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.file.display())),
            warnings: Vec::new(),
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(&args.file).and_then(|config| summarize(&config)) {
        Ok(summary) => ValidationResult {
            valid: true,
            config_path,
            error: None,
            warnings: collect_warnings(&summary),
            summary: Some(summary),
        },
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: Vec::new(),
            summary: None,
        },
    }
}

fn summarize(config: &GridConfig) -> Result<ConfigSummary, contracts::ContractError> {
    let defaults = GridConfig::defaults();
    let mut extra_keys: Vec<String> = config
        .snapshot()
        .keys()
        .filter(|k| !defaults.contains_key(k.as_str()))
        .cloned()
        .collect();
    extra_keys.sort();

    Ok(ConfigSummary {
        fire_threshold_celsius: config.fire_threshold_celsius()?,
        api_endpoint: config
            .get(keys::API_ENDPOINT)
            .map(|v| v.to_string())
            .unwrap_or_default(),
        extra_keys,
    })
}

/// Non-fatal issues
fn collect_warnings(summary: &ConfigSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    if !summary.api_endpoint.starts_with("https://") {
        warnings.push(format!(
            "api_endpoint '{}' is not HTTPS",
            summary.api_endpoint
        ));
    }
    if summary.fire_threshold_celsius <= 0.0 {
        warnings.push(format!(
            "fire_threshold_celsius {} will alert on almost every reading",
            summary.fire_threshold_celsius
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Fire threshold: {} °C", summary.fire_threshold_celsius);
            println!("  API endpoint: {}", summary.api_endpoint);
            if !summary.extra_keys.is_empty() {
                println!("  Extra keys: {}", summary.extra_keys.join(", "));
            }
        }

        if !result.warnings.is_empty() {
            println!("\n⚠ Warnings:");
            for warning in &result.warnings {
                println!("  - {warning}");
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {error}");
        }
    }
}
