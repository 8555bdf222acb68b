//! Ingestion Pipeline main entry

use std::sync::Arc;
use std::time::{Duration, Instant};

use contracts::{ContractError, DeviceId, Reading, Sensor};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::config::{delay_from_secs, IngestionMetrics, MetricsSnapshot};
use crate::error::{IngestionError, Result};
use crate::simulator::SensorStreamSimulator;

/// Ingestion Pipeline
///
/// Polls simulated sensors with a fixed network latency. Batches fan out one
/// task per sensor and are joined back in input order.
#[derive(Debug, Default, Clone)]
pub struct IngestionPipeline {
    metrics: Arc<IngestionMetrics>,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Poll one simulated sensor after `delay_secs` of latency
    ///
    /// # Errors
    /// `InvalidArgument` for a negative delay or an empty id. Both are
    /// checked before any waiting happens.
    #[instrument(name = "ingestion_poll_one", skip(self))]
    pub async fn poll_one(&self, sensor_id: &str, delay_secs: f64) -> Result<Reading> {
        let delay = delay_from_secs(delay_secs)?;
        let sensor_id = DeviceId::new(sensor_id)?;
        poll_simulated(sensor_id, delay, Arc::clone(&self.metrics)).await
    }

    /// Poll every id concurrently with the same latency
    ///
    /// Readings come back in the order of `sensor_ids`. Wall-clock time is
    /// about one `delay_secs` regardless of the batch size.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty batch, a negative delay or an empty id
    /// - the first failure among the poll units; no partial results
    #[instrument(
        name = "ingestion_poll_many",
        skip(self, sensor_ids),
        fields(batch_size = sensor_ids.len())
    )]
    pub async fn poll_many<S: AsRef<str>>(
        &self,
        sensor_ids: &[S],
        delay_secs: f64,
    ) -> Result<Vec<Reading>> {
        if sensor_ids.is_empty() {
            return Err(ContractError::invalid_argument("sensor_ids", "must not be empty").into());
        }
        let delay = delay_from_secs(delay_secs)?;
        let ids = sensor_ids
            .iter()
            .map(|id| DeviceId::new(id.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.metrics.record_batch();
        let started = Instant::now();

        let mut tasks = JoinSet::new();
        for (idx, id) in ids.iter().cloned().enumerate() {
            let metrics = Arc::clone(&self.metrics);
            tasks.spawn(async move { (idx, poll_simulated(id, delay, metrics).await) });
        }

        let readings = join_ordered(tasks, &ids).await?;

        info!(
            readings = readings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch poll completed"
        );
        Ok(readings)
    }

    /// Read factory-built sensors concurrently
    ///
    /// Each `read` runs on the blocking pool. Results follow input order;
    /// the first failing sensor fails the whole call.
    #[instrument(
        name = "ingestion_poll_devices",
        skip(self, sensors),
        fields(batch_size = sensors.len())
    )]
    pub async fn poll_devices(&self, sensors: &[Arc<dyn Sensor>]) -> Result<Vec<Reading>> {
        if sensors.is_empty() {
            return Err(ContractError::invalid_argument("sensors", "must not be empty").into());
        }
        self.metrics.record_batch();

        let ids: Vec<DeviceId> = sensors.iter().map(|s| s.device_id().clone()).collect();
        let mut tasks = JoinSet::new();
        for (idx, sensor) in sensors.iter().cloned().enumerate() {
            let metrics = Arc::clone(&self.metrics);
            tasks.spawn_blocking(move || {
                let result = sensor.read().map_err(IngestionError::from);
                record_outcome(&metrics, &result, Duration::ZERO);
                (idx, result)
            });
        }

        join_ordered(tasks, &ids).await
    }
}

/// One poll unit: wait out the latency, then draw from a fresh stream
async fn poll_simulated(
    sensor_id: DeviceId,
    delay: Duration,
    metrics: Arc<IngestionMetrics>,
) -> Result<Reading> {
    let started = Instant::now();
    tokio::time::sleep(delay).await;

    let result = SensorStreamSimulator::for_device(sensor_id.clone())
        .next()
        .ok_or_else(|| {
            IngestionError::from(ContractError::Other(format!(
                "stream for '{sensor_id}' ended"
            )))
        });

    record_outcome(&metrics, &result, started.elapsed());
    debug!(sensor_id = %sensor_id, ok = result.is_ok(), "poll finished");
    result
}

fn record_outcome(metrics: &IngestionMetrics, result: &Result<Reading>, latency: Duration) {
    match result {
        Ok(_) => {
            metrics.record_completed();
            metrics::counter!("citypulse_polls_total", "outcome" => "ok").increment(1);
            metrics::histogram!("citypulse_poll_latency_ms").record(latency.as_secs_f64() * 1000.0);
        }
        Err(_) => {
            metrics.record_failed();
            metrics::counter!("citypulse_polls_total", "outcome" => "error").increment(1);
        }
    }
}

/// Join indexed tasks into input order, failing on the first error
///
/// Remaining tasks are aborted when the set is dropped on the error path.
async fn join_ordered(
    mut tasks: JoinSet<(usize, Result<Reading>)>,
    ids: &[DeviceId],
) -> Result<Vec<Reading>> {
    let mut slots: Vec<Option<Reading>> = vec![None; ids.len()];

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, Ok(reading))) => slots[idx] = Some(reading),
            Ok((idx, Err(e))) => {
                warn!(sensor_id = %ids[idx], error = %e, "poll failed, aborting batch");
                return Err(e);
            }
            Err(join_err) => {
                warn!(error = %join_err, "poll task did not complete, aborting batch");
                return Err(IngestionError::poll_task("<batch>", join_err.to_string()));
            }
        }
    }

    slots
        .into_iter()
        .zip(ids)
        .map(|(slot, id)| {
            slot.ok_or_else(|| IngestionError::poll_task(id.as_str(), "no reading produced"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::metric;

    #[tokio::test]
    async fn test_poll_one() {
        let pipeline = IngestionPipeline::new();
        let reading = pipeline.poll_one("SENSOR-1", 0.0).await.unwrap();

        assert_eq!(reading.source().unwrap(), "SENSOR-1");
        assert!(reading.get(metric::TEMPERATURE_CELSIUS).is_some());
        assert!(reading.get(metric::HUMIDITY_PERCENT).is_some());
        assert!(reading.get(metric::CO2_PPM).is_some());
        assert_eq!(pipeline.metrics().polls_completed, 1);
    }

    #[tokio::test]
    async fn test_poll_one_negative_delay() {
        let pipeline = IngestionPipeline::new();
        let err = pipeline.poll_one("SENSOR-1", -1.0).await.unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::InvalidArgument { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_delay_is_rejected_not_panicking() {
        let pipeline = IngestionPipeline::new();
        let err = pipeline.poll_one("SENSOR-1", 1e20).await.unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::InvalidArgument { .. })
        ));
        assert!(pipeline.poll_many(&["A", "B"], 1e20).await.is_err());
        assert_eq!(pipeline.metrics().batches, 0);
    }

    #[tokio::test]
    async fn test_poll_one_empty_id() {
        let pipeline = IngestionPipeline::new();
        assert!(pipeline.poll_one("", 0.0).await.is_err());
    }

    #[tokio::test]
    async fn test_poll_many_preserves_order() {
        let pipeline = IngestionPipeline::new();
        let readings = pipeline.poll_many(&["A", "B", "C"], 0.01).await.unwrap();

        let order: Vec<&str> = readings
            .iter()
            .map(|r| r.source().unwrap().as_str())
            .collect();
        assert_eq!(order, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_poll_many_is_concurrent_wall_clock() {
        let pipeline = IngestionPipeline::new();
        let started = Instant::now();
        let readings = pipeline.poll_many(&["A", "B", "C"], 0.1).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(readings.len(), 3);
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(250), "took {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_many_latency_independent_of_batch_size() {
        let pipeline = IngestionPipeline::new();
        let ids: Vec<String> = (1..=100).map(|i| format!("SENSOR-{i}")).collect();

        let started = tokio::time::Instant::now();
        let readings = pipeline.poll_many(&ids, 0.1).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(readings.len(), 100);
        assert!(elapsed < Duration::from_millis(150), "took {elapsed:?}");
        for (reading, id) in readings.iter().zip(&ids) {
            assert_eq!(reading.source().unwrap().as_str(), id);
        }
    }

    #[tokio::test]
    async fn test_poll_many_empty() {
        let pipeline = IngestionPipeline::new();
        let ids: [&str; 0] = [];
        let err = pipeline.poll_many(&ids, 0.1).await.unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::InvalidArgument { .. })
        ));
        assert_eq!(pipeline.metrics().batches, 0);
    }

    #[tokio::test]
    async fn test_poll_many_rejects_empty_id_before_spawning() {
        let pipeline = IngestionPipeline::new();
        let err = pipeline.poll_many(&["A", ""], 0.0).await.unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::InvalidArgument { .. })
        ));
        assert_eq!(pipeline.metrics().polls_completed, 0);
    }

    struct Flaky {
        id: DeviceId,
        fail: bool,
    }

    impl Sensor for Flaky {
        fn device_id(&self) -> &DeviceId {
            &self.id
        }

        fn type_name(&self) -> &'static str {
            "Flaky"
        }

        fn read(&self) -> std::result::Result<Reading, ContractError> {
            if self.fail {
                Err(ContractError::invariant("impossible reading"))
            } else {
                Ok(Reading::from_device(self.id.clone(), [("ok", 1.0)]))
            }
        }

        fn health_check(&self) -> bool {
            !self.fail
        }
    }

    fn flaky(id: &str, fail: bool) -> Arc<dyn Sensor> {
        Arc::new(Flaky {
            id: DeviceId::new(id).unwrap(),
            fail,
        })
    }

    #[tokio::test]
    async fn test_poll_devices_order() {
        let pipeline = IngestionPipeline::new();
        let sensors = vec![flaky("x", false), flaky("y", false), flaky("z", false)];
        let readings = pipeline.poll_devices(&sensors).await.unwrap();

        let order: Vec<&str> = readings
            .iter()
            .map(|r| r.source().unwrap().as_str())
            .collect();
        assert_eq!(order, ["x", "y", "z"]);
    }

    #[tokio::test]
    async fn test_poll_devices_first_error_fails_batch() {
        let pipeline = IngestionPipeline::new();
        let sensors = vec![flaky("x", false), flaky("bad", true), flaky("z", false)];
        let err = pipeline.poll_devices(&sensors).await.unwrap_err();

        assert!(matches!(
            err,
            IngestionError::Contract(ContractError::InvariantViolation { .. })
        ));
    }
}
