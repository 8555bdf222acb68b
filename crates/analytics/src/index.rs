//! Heatmap index
//!
//! `index = 0.5 * temperature + 0.3 * humidity + 0.2 * ln(co2)`

use contracts::{metric, ContractError, Reading};

use crate::Result;

const TEMPERATURE_WEIGHT: f64 = 0.5;
const HUMIDITY_WEIGHT: f64 = 0.3;
const CO2_WEIGHT: f64 = 0.2;

/// Compute the index element-wise over three equally long columns
///
/// # Errors
/// `InvalidArgument` if lengths differ or any CO2 value is not positive.
pub fn heatmap_index(temperature: &[f64], humidity: &[f64], co2: &[f64]) -> Result<Vec<f64>> {
    if temperature.len() != humidity.len() || temperature.len() != co2.len() {
        return Err(ContractError::invalid_argument(
            "columns",
            format!(
                "all input columns must have the same length (temperature={}, humidity={}, co2={})",
                temperature.len(),
                humidity.len(),
                co2.len()
            ),
        ));
    }
    if let Some(bad) = co2.iter().find(|c| c.is_nan() || **c <= 0.0) {
        return Err(ContractError::invalid_argument(
            "co2",
            format!("concentration must be positive, got {bad}"),
        ));
    }

    Ok(temperature
        .iter()
        .zip(humidity)
        .zip(co2)
        .map(|((t, h), c)| TEMPERATURE_WEIGHT * t + HUMIDITY_WEIGHT * h + CO2_WEIGHT * c.ln())
        .collect())
}

/// Compute the index for a batch of readings
///
/// Returns one value per reading, in batch order.
///
/// # Errors
/// `InvalidArgument` if a reading lacks one of the three metrics.
pub fn heatmap_index_for(batch: &[Reading]) -> Result<Vec<f64>> {
    let mut temperature = Vec::with_capacity(batch.len());
    let mut humidity = Vec::with_capacity(batch.len());
    let mut co2 = Vec::with_capacity(batch.len());

    for (idx, reading) in batch.iter().enumerate() {
        temperature.push(require(reading, idx, metric::TEMPERATURE_CELSIUS)?);
        humidity.push(require(reading, idx, metric::HUMIDITY_PERCENT)?);
        co2.push(require(reading, idx, metric::CO2_PPM)?);
    }

    heatmap_index(&temperature, &humidity, &co2)
}

fn require(reading: &Reading, idx: usize, name: &str) -> Result<f64> {
    reading.get(name).ok_or_else(|| {
        ContractError::invalid_argument(format!("batch[{idx}].{name}"), "metric missing")
    })
}
