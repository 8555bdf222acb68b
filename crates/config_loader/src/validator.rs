//! Config validation
//!
//! Rules:
//! - fire_threshold_celsius finite and within [-273.15, 10000]
//! - api_endpoint non-empty
//! - extra keys non-empty and not shadowing a typed key

use contracts::{keys, ContractError};
use validator::Validate;

use crate::file::GridConfigFile;

/// Validate a parsed config file
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(file: &GridConfigFile) -> Result<(), ContractError> {
    validate_fields(file)?;
    validate_extra_keys(file)?;
    Ok(())
}

fn validate_fields(file: &GridConfigFile) -> Result<(), ContractError> {
    // Range checks compare false against NaN.
    if let Some(threshold) = file.fire_threshold_celsius.filter(|t| !t.is_finite()) {
        return Err(ContractError::config_validation(
            keys::FIRE_THRESHOLD_CELSIUS,
            format!("must be a finite number, got {threshold}"),
        ));
    }

    file.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .iter()
                    .map(|e| e.code.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                ContractError::config_validation(field.to_string(), message)
            }
            None => ContractError::config_validation("<root>", errors.to_string()),
        }
    })
}

fn validate_extra_keys(file: &GridConfigFile) -> Result<(), ContractError> {
    for key in file.extra.keys() {
        if key.is_empty() {
            return Err(ContractError::config_validation("extra", "empty key"));
        }
        if key == keys::FIRE_THRESHOLD_CELSIUS || key == keys::API_ENDPOINT {
            return Err(ContractError::config_validation(
                format!("extra.{key}"),
                "typed key must be set at top level",
            ));
        }
    }
    Ok(())
}
