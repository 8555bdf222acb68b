//! `demo` command implementation.

use std::sync::Arc;

use analytics::{LoRaWanStrategy, TransmissionStrategy, WiFiStrategy};
use anyhow::{Context, Result};
use contracts::{DeviceId, Reading, Sensor};
use device_factory::{
    DeviceFactory, FireSensor, RegisteredSensor, SensorTypeRegistry, TrafficSensor,
};
use dispatcher::{AlertDispatcher, ConsoleSubscriber};
use tracing::info;

use super::load_grid_config;
use crate::cli::Cli;

const STRATEGY_PAYLOAD_LEN: usize = 100;

/// Execute the `demo` command
pub async fn run_demo(cli: &Cli) -> Result<()> {
    let config = load_grid_config(cli.config.as_deref())?;
    println!(
        "[Config] Fire threshold: {} °C",
        config.fire_threshold_celsius()?
    );

    let dispatcher = Arc::new(AlertDispatcher::new());
    dispatcher.subscribe(Arc::new(ConsoleSubscriber::new()));

    let registry = SensorTypeRegistry::with_builtins();
    registry.register_alerting(Arc::clone(&dispatcher), Arc::clone(&config));
    let factory = DeviceFactory::new(Arc::new(registry));

    let traffic = factory
        .create_device(TrafficSensor::TYPE_NAME, "TRAFFIC-001")
        .context("Failed to create traffic sensor")?;
    let fire = FireSensor::new(
        DeviceId::new("FIRE-001")?,
        Arc::clone(&dispatcher),
        Arc::clone(&config),
    );

    println!("[Sensors] Traffic reading: {}", render(&traffic.read()?)?);
    println!("[Sensors] Fire reading: {}", render(&fire.read()?)?);

    let payload = "X".repeat(STRATEGY_PAYLOAD_LEN);
    let strategies: [&dyn TransmissionStrategy; 2] = [&WiFiStrategy, &LoRaWanStrategy];
    for strategy in strategies {
        println!(
            "[Strategy] {} data size: {}",
            strategy.name(),
            strategy.transmit(&payload).len()
        );
    }

    let alerts = dispatcher.metrics().snapshot();
    info!(
        broadcasts = alerts.broadcast_count,
        deliveries = alerts.delivery_count,
        "Demo complete"
    );
    Ok(())
}

fn render(reading: &Reading) -> Result<String> {
    serde_json::to_string(reading.metrics()).context("Failed to serialize reading")
}
