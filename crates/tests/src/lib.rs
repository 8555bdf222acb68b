//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Responsibilities:
//! - Factory -> sensor -> dispatcher alert flow
//! - Config file driving sensor behaviour
//! - Ingestion feeding analytics

#[cfg(test)]
mod e2e_tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use analytics::{heatmap_index_for, LoRaWanStrategy, SensorCache, TransmissionStrategy};
    use config_loader::ConfigLoader;
    use contracts::{metric, AlertMessage, ContractError, ErrorKind, Sensor, Subscriber};
    use device_factory::{DeviceFactory, FireSensor, SensorTypeRegistry};
    use dispatcher::{AlertDispatcher, ChannelSubscriber};
    use ingestion::IngestionPipeline;
    use observability::ReadingStatsAggregator;

    fn grid(
        config: Arc<config_loader::GridConfig>,
    ) -> (DeviceFactory, Arc<AlertDispatcher>, tokio::sync::mpsc::UnboundedReceiver<AlertMessage>) {
        let dispatcher = Arc::new(AlertDispatcher::new());
        let (subscriber, rx) = ChannelSubscriber::new("ops");
        dispatcher.subscribe(Arc::new(subscriber));

        let registry = SensorTypeRegistry::with_builtins();
        registry.register_alerting(Arc::clone(&dispatcher), config);
        (DeviceFactory::new(Arc::new(registry)), dispatcher, rx)
    }

    /// Factory-made fire sensors alert through the dispatcher only above threshold
    #[tokio::test]
    async fn test_fire_sensor_alert_flow() {
        let config = Arc::new(config_loader::GridConfig::new());
        let (factory, dispatcher, mut rx) = grid(Arc::clone(&config));

        let fire = factory.create_device("FireSensor", "FIRE-001").unwrap();
        assert!(fire.health_check());

        // Sampled range is [20, 120]; at threshold 150 nothing should fire.
        config.set("fire_threshold_celsius", 150.0);
        for _ in 0..20 {
            fire.read().unwrap();
        }
        assert!(rx.try_recv().is_err());
        assert_eq!(dispatcher.metrics().snapshot().broadcast_count, 0);

        // Below the sampled minimum every read alerts exactly once.
        config.set("fire_threshold_celsius", 0.0);
        let reading = fire.read().unwrap();
        let alert = rx.recv().await.unwrap();
        let temperature = reading.get(metric::TEMPERATURE_CELSIUS).unwrap();
        assert_eq!(
            alert.text(),
            format!("FIRE ALERT from FIRE-001: {temperature:.2} °C")
        );
        assert!(rx.try_recv().is_err());
    }

    /// A config file loaded from disk drives the alert threshold
    #[tokio::test]
    async fn test_config_file_drives_threshold() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fire_threshold_celsius = 0.0").unwrap();
        let config = Arc::new(ConfigLoader::load_from_path(file.path()).unwrap());
        assert_eq!(config.fire_threshold_celsius().unwrap(), 0.0);

        let (factory, _dispatcher, mut rx) = grid(config);
        factory.create_device("FireSensor", "FIRE-9").unwrap().read().unwrap();

        let alert = rx.recv().await.unwrap();
        assert!(alert.text().starts_with("FIRE ALERT from FIRE-9"));
    }

    /// A failing subscriber surfaces through the sensor read
    #[test]
    fn test_subscriber_failure_surfaces_in_read() {
        struct Broken;
        impl Subscriber for Broken {
            fn name(&self) -> &str {
                "broken"
            }
            fn notify(&self, _: &AlertMessage) -> Result<(), ContractError> {
                Err(ContractError::subscriber("broken", "pager offline"))
            }
        }

        let config = Arc::new(config_loader::GridConfig::new());
        config.set("fire_threshold_celsius", -100.0);
        let dispatcher = Arc::new(AlertDispatcher::new());
        dispatcher.subscribe(Arc::new(Broken));

        let sensor = FireSensor::new(
            contracts::DeviceId::new("FIRE-X").unwrap(),
            Arc::clone(&dispatcher),
            config,
        );
        let err = sensor.read().unwrap_err();
        assert!(matches!(err, ContractError::Subscriber { .. }));
        assert_eq!(dispatcher.metrics().snapshot().failure_count, 1);
    }

    #[test]
    fn test_unknown_type_through_factory() {
        let (factory, _, _rx) = grid(Arc::new(config_loader::GridConfig::new()));
        let err = factory.create_device("Sonar", "S-1").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownType);
        assert_eq!(
            factory.registry().list_registered().into_iter().collect::<Vec<_>>(),
            vec!["FireSensor".to_string(), "TrafficSensor".to_string()]
        );
    }

    /// Re-registering a name changes what the factory builds
    #[test]
    fn test_reregistration_last_writer_wins() {
        let (factory, _, _rx) = grid(Arc::new(config_loader::GridConfig::new()));
        let previous = factory.registry().register(
            "FireSensor",
            factory.registry().get("TrafficSensor").unwrap(),
        );
        assert!(previous.is_some());

        let sensor = factory.create_device("FireSensor", "F-2").unwrap();
        assert_eq!(sensor.type_name(), "TrafficSensor");
    }

    /// Simulated ingestion feeds the heatmap index and reading statistics
    #[tokio::test(start_paused = true)]
    async fn test_ingestion_into_analytics() {
        let ids: Vec<String> = (1..=50).map(|i| format!("SENSOR-{i}")).collect();
        let pipeline = IngestionPipeline::new();

        let readings = pipeline.poll_many(&ids, 0.1).await.unwrap();
        assert_eq!(readings.len(), 50);
        for (id, reading) in ids.iter().zip(&readings) {
            assert_eq!(reading.source().unwrap().as_str(), id);
        }

        let index = heatmap_index_for(&readings).unwrap();
        assert_eq!(index.len(), readings.len());
        assert!(index.iter().all(|v| v.is_finite()));

        let mut stats = ReadingStatsAggregator::new();
        readings.iter().for_each(|r| stats.update(r));
        let report = stats.summary();
        assert_eq!(report.metrics[metric::CO2_PPM].count, 50);
        assert!(report.metrics[metric::TEMPERATURE_CELSIUS].min >= 15.0);
        assert!(report.metrics[metric::TEMPERATURE_CELSIUS].max <= 100.0);

        assert_eq!(pipeline.metrics().polls_completed, 50);
    }

    /// Factory-made devices polled as a fleet, cached weakly
    #[tokio::test]
    async fn test_device_fleet_with_cache() {
        let (factory, _, _rx) = grid(Arc::new(config_loader::GridConfig::new()));
        let cache: SensorCache<dyn Sensor> = SensorCache::new();

        let fleet: Vec<Arc<dyn Sensor>> = (0..5)
            .map(|i| factory.create_shared("TrafficSensor", &format!("TRAFFIC-{i}")).unwrap())
            .collect();
        for sensor in &fleet {
            cache.add(sensor.device_id().as_str(), sensor).unwrap();
        }
        assert_eq!(cache.size(), 5);

        let readings = IngestionPipeline::new().poll_devices(&fleet).await.unwrap();
        let cars: Vec<f64> = readings
            .iter()
            .map(|r| r.get(metric::CARS_PER_MIN).unwrap())
            .collect();
        assert!(cars.iter().all(|c| (0.0..=200.0).contains(c)));

        drop(fleet);
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.force_cleanup(), 5);
    }

    /// Ingestion keeps running while alerts are consumed asynchronously
    #[tokio::test]
    async fn test_alert_consumer_does_not_block_ingestion() {
        let config = Arc::new(config_loader::GridConfig::new());
        config.set("fire_threshold_celsius", 0.0);
        let (factory, _, mut rx) = grid(config);

        let consumed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&consumed);
        let consumer = tokio::spawn(async move {
            while let Some(alert) = rx.recv().await {
                let _ = LoRaWanStrategy.transmit(alert.text());
                tokio::time::sleep(Duration::from_millis(5)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let fleet: Vec<Arc<dyn Sensor>> = (0..10)
            .map(|i| factory.create_shared("FireSensor", &format!("FIRE-{i}")).unwrap())
            .collect();
        let readings = IngestionPipeline::new().poll_devices(&fleet).await.unwrap();
        assert_eq!(readings.len(), 10);

        drop(fleet);
        drop(factory);
        tokio::time::timeout(Duration::from_secs(5), consumer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(consumed.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_security_round_trip_for_reading() {
        let key = security::generate_key();
        let payload = br#"{"temperature_celsius":42.0}"#;
        let token = security::encrypt(payload, &key).unwrap();
        assert_eq!(&security::decrypt(&token, &key).unwrap()[..], &payload[..]);
        assert_eq!(security::sha256_hex(payload).len(), 64);
    }
}
