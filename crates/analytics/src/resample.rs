//! Per-minute resampling

use std::collections::BTreeMap;

use contracts::{metric, ContractError, Reading};
use serde::Serialize;

use crate::Result;

/// A reading with its capture time (unix seconds)
#[derive(Debug, Clone)]
pub struct TimedReading {
    pub timestamp_secs: i64,
    pub reading: Reading,
}

/// Mean values for one minute bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinuteAggregate {
    /// Bucket start (unix seconds, multiple of 60)
    pub minute_start: i64,
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub co2_ppm: f64,
    pub samples: usize,
}

#[derive(Default)]
struct Accumulator {
    temperature: f64,
    humidity: f64,
    co2: f64,
    samples: usize,
}

/// Average temperature, humidity and CO2 per minute
///
/// Buckets are returned in ascending time order; empty minutes are skipped.
///
/// # Errors
/// `InvalidArgument` if any reading lacks one of the three metrics.
pub fn resample_per_minute(readings: &[TimedReading]) -> Result<Vec<MinuteAggregate>> {
    let mut buckets: BTreeMap<i64, Accumulator> = BTreeMap::new();

    for (idx, timed) in readings.iter().enumerate() {
        let value = |name: &str| {
            timed.reading.get(name).ok_or_else(|| {
                ContractError::invalid_argument(
                    format!("readings[{idx}]"),
                    format!("missing required metric '{name}'"),
                )
            })
        };
        let temperature = value(metric::TEMPERATURE_CELSIUS)?;
        let humidity = value(metric::HUMIDITY_PERCENT)?;
        let co2 = value(metric::CO2_PPM)?;

        let acc = buckets
            .entry(timed.timestamp_secs.div_euclid(60) * 60)
            .or_default();
        acc.temperature += temperature;
        acc.humidity += humidity;
        acc.co2 += co2;
        acc.samples += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(minute_start, acc)| {
            let n = acc.samples as f64;
            MinuteAggregate {
                minute_start,
                temperature_celsius: acc.temperature / n,
                humidity_percent: acc.humidity / n,
                co2_ppm: acc.co2 / n,
                samples: acc.samples,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: i64, t: f64, h: f64, c: f64) -> TimedReading {
        TimedReading {
            timestamp_secs: ts,
            reading: Reading::new([
                (metric::TEMPERATURE_CELSIUS, t),
                (metric::HUMIDITY_PERCENT, h),
                (metric::CO2_PPM, c),
            ]),
        }
    }

    #[test]
    fn test_groups_by_minute() {
        let rows = vec![
            at(0, 10.0, 20.0, 400.0),
            at(30, 20.0, 40.0, 600.0),
            at(59, 30.0, 60.0, 800.0),
            at(61, 50.0, 50.0, 500.0),
        ];
        let out = resample_per_minute(&rows).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].minute_start, 0);
        assert_eq!(out[0].samples, 3);
        assert!((out[0].temperature_celsius - 20.0).abs() < 1e-12);
        assert!((out[0].co2_ppm - 600.0).abs() < 1e-12);
        assert_eq!(out[1].minute_start, 60);
        assert_eq!(out[1].samples, 1);
    }

    #[test]
    fn test_skips_empty_minutes() {
        let out = resample_per_minute(&[at(0, 1.0, 1.0, 1.0), at(600, 2.0, 2.0, 2.0)]).unwrap();
        let starts: Vec<i64> = out.iter().map(|a| a.minute_start).collect();
        assert_eq!(starts, [0, 600]);
    }

    #[test]
    fn test_missing_column() {
        let rows = vec![TimedReading {
            timestamp_secs: 0,
            reading: Reading::new([(metric::TEMPERATURE_CELSIUS, 1.0)]),
        }];
        assert!(resample_per_minute(&rows).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(resample_per_minute(&[]).unwrap().is_empty());
    }
}
