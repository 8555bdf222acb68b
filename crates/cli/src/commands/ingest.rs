//! `ingest` command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use ingestion::IngestionPipeline;
use observability::ReadingStatsAggregator;
use tracing::info;

use crate::cli::IngestArgs;

/// Execute the `ingest` command
pub async fn run_ingest(args: &IngestArgs) -> Result<()> {
    if args.count == 0 {
        anyhow::bail!("--count must be at least 1");
    }

    let sensor_ids: Vec<String> = (1..=args.count).map(|i| format!("SENSOR-{i}")).collect();
    let pipeline = IngestionPipeline::new();

    info!(sensors = sensor_ids.len(), delay_secs = args.delay, "Starting ingestion");
    let started = Instant::now();
    let readings = pipeline
        .poll_many(&sensor_ids, args.delay)
        .await
        .context("Ingestion failed")?;
    let elapsed = started.elapsed();

    println!(
        "[Ingestion] Collected {} sensor readings in {:.1} ms.",
        readings.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    let mut stats = ReadingStatsAggregator::new();
    for reading in &readings {
        observability::record_reading(reading);
        stats.update(reading);
    }
    if args.stats {
        print!("{}", stats.summary());
    }

    let metrics = pipeline.metrics();
    info!(
        completed = metrics.polls_completed,
        failed = metrics.polls_failed,
        "Ingestion finished"
    );
    Ok(())
}
