//! Configuration keys understood by the grid core.

/// Fire alert threshold in degrees Celsius (float, default 80.0).
pub const FIRE_THRESHOLD_CELSIUS: &str = "fire_threshold_celsius";

/// Upstream API endpoint (text).
pub const API_ENDPOINT: &str = "api_endpoint";
