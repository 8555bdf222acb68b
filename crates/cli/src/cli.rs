//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CityPulse - IoT sensor grid simulator
#[derive(Parser, Debug)]
#[command(
    name = "citypulse",
    author,
    version,
    about = "IoT sensor grid: registry, factory, concurrent ingestion and alerting",
    long_about = "Simulates a city sensor grid.\n\n\
                  Sensor types register into a shared catalog, devices are created on \n\
                  demand, polled concurrently, and threshold breaches are broadcast to \n\
                  subscribers."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CITYPULSE_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "CITYPULSE_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Grid configuration overrides (TOML or JSON)
    #[arg(short, long, global = true, env = "CITYPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Expose Prometheus metrics on this port
    #[arg(long, global = true, env = "CITYPULSE_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Config, dispatcher, factory-made sensors and transmission strategies
    Demo,

    /// Poll simulated sensors concurrently
    Ingest(IngestArgs),

    /// List registered sensor types
    Registry(RegistryArgs),

    /// Hashing, encryption and safe-path demo
    Security(SecurityArgs),

    /// Heatmap index, per-minute resampling and cache reclamation
    Analytics(AnalyticsArgs),

    /// Validate a configuration file without running anything
    Validate(ValidateArgs),
}

/// Arguments for the `ingest` command
#[derive(Parser, Debug, Clone)]
pub struct IngestArgs {
    /// Number of simulated sensors to poll
    #[arg(short = 'n', long, default_value = "100", env = "CITYPULSE_INGEST_COUNT")]
    pub count: usize,

    /// Per-poll delay in seconds
    #[arg(
        short,
        long,
        default_value_t = ingestion::DEFAULT_POLL_DELAY.as_secs_f64(),
        env = "CITYPULSE_POLL_DELAY"
    )]
    pub delay: f64,

    /// Print per-metric statistics over the collected readings
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the `registry` command
#[derive(Parser, Debug)]
pub struct RegistryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `security` command
#[derive(Parser, Debug)]
pub struct SecurityArgs {
    /// Payload to hash
    #[arg(long, default_value = r#"{"sensor":"SENSOR-1","value":42}"#)]
    pub payload: String,

    /// Secret to encrypt and decrypt
    #[arg(long, default_value = "12.9716,77.5946")]
    pub secret: String,

    /// Base directory for per-sensor log files
    #[arg(long, default_value = "var/logs")]
    pub log_dir: PathBuf,

    /// Sensor name to build a log path for
    #[arg(long, default_value = "TrafficSensor")]
    pub sensor_name: String,
}

/// Arguments for the `analytics` command
#[derive(Parser, Debug)]
pub struct AnalyticsArgs {
    /// Number of random rows
    #[arg(short, long, default_value = "100000")]
    pub rows: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "citypulse.toml")]
    pub file: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
