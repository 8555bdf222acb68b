//! `analytics` command implementation.

use std::sync::Arc;
use std::time::Instant;

use analytics::{heatmap_index, resample_per_minute, SensorCache, TimedReading};
use anyhow::{Context, Result};
use contracts::{metric, Reading};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::cli::AnalyticsArgs;

const HEAVY_PAYLOAD_LEN: usize = 1_000_000;

#[derive(Serialize)]
struct AnalyticsReport {
    rows: usize,
    mean_heatmap_index: f64,
    index_elapsed_ms: f64,
    minute_buckets: usize,
    cache_size_before_drop: usize,
    cache_size_after_drop: usize,
    cache_entries_reclaimed: usize,
}

/// Execute the `analytics` command
pub fn run_analytics(args: &AnalyticsArgs) -> Result<()> {
    if args.rows == 0 {
        anyhow::bail!("--rows must be at least 1");
    }

    let mut rng = rand::rng();
    let temperature: Vec<f64> = (0..args.rows).map(|_| rng.random_range(10.0..=50.0)).collect();
    let humidity: Vec<f64> = (0..args.rows).map(|_| rng.random_range(10.0..=90.0)).collect();
    let co2: Vec<f64> = (0..args.rows)
        .map(|_| rng.random_range(300.0..=2000.0))
        .collect();

    let started = Instant::now();
    let index = heatmap_index(&temperature, &humidity, &co2).context("Heatmap index failed")?;
    let index_elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let mean_heatmap_index = index.iter().sum::<f64>() / index.len() as f64;

    // One synthetic row per second.
    let timed: Vec<TimedReading> = (0..args.rows)
        .map(|i| TimedReading {
            timestamp_secs: i as i64,
            reading: Reading::new([
                (metric::TEMPERATURE_CELSIUS, temperature[i]),
                (metric::HUMIDITY_PERCENT, humidity[i]),
                (metric::CO2_PPM, co2[i]),
            ]),
        })
        .collect();
    let minute_buckets = resample_per_minute(&timed)
        .context("Resampling failed")?
        .len();

    let cache: SensorCache<Vec<u8>> = SensorCache::new();
    let heavy = Arc::new(vec![0u8; HEAVY_PAYLOAD_LEN]);
    cache.add("heavy", &heavy)?;
    let cache_size_before_drop = cache.size();
    drop(heavy);
    let cache_entries_reclaimed = cache.force_cleanup();

    let report = AnalyticsReport {
        rows: args.rows,
        mean_heatmap_index,
        index_elapsed_ms,
        minute_buckets,
        cache_size_before_drop,
        cache_size_after_drop: cache.size(),
        cache_entries_reclaimed,
    };
    info!(rows = report.rows, elapsed_ms = report.index_elapsed_ms, "Analytics complete");

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        println!(
            "[Performance] Heatmap index computed for {} rows in {:.1} ms (mean {:.3}).",
            report.rows, report.index_elapsed_ms, report.mean_heatmap_index
        );
        println!("[Analytics] Resampled into {} minute buckets.", report.minute_buckets);
        println!("[Memory] Cache size before delete: {}", report.cache_size_before_drop);
        println!("[Memory] Reclaimed {} cache entries.", report.cache_entries_reclaimed);
        println!("[Memory] Cache size after cleanup: {}", report.cache_size_after_drop);
    }

    Ok(())
}
