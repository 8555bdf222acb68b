//! `registry` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use device_factory::SensorTypeRegistry;
use dispatcher::{AlertDispatcher, LogSubscriber};
use serde::Serialize;

use super::load_grid_config;
use crate::cli::{Cli, RegistryArgs};

#[derive(Serialize)]
struct RegistryInfo {
    sensor_types: Vec<String>,
    fire_threshold_celsius: f64,
}

/// Execute the `registry` command
pub fn run_registry(cli: &Cli, args: &RegistryArgs) -> Result<()> {
    let config = load_grid_config(cli.config.as_deref())?;

    let dispatcher = Arc::new(AlertDispatcher::new());
    dispatcher.subscribe(Arc::new(LogSubscriber::new("registry")));

    let registry = SensorTypeRegistry::with_builtins();
    registry.register_alerting(dispatcher, Arc::clone(&config));

    let info = RegistryInfo {
        sensor_types: registry.list_registered().into_iter().collect(),
        fire_threshold_celsius: config.fire_threshold_celsius()?,
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize registry")?;
        println!("{json}");
    } else {
        println!("Registered sensor types ({}):", info.sensor_types.len());
        for name in &info.sensor_types {
            println!("  - {name}");
        }
        println!("Fire alert threshold: {} °C", info.fire_threshold_celsius);
    }

    Ok(())
}
