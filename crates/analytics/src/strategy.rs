//! Transmission strategies
//!
//! How a payload is shaped for the uplink it travels over.

/// Uplink payload strategy
pub trait TransmissionStrategy: Send + Sync {
    /// Strategy name (used for logging)
    fn name(&self) -> &'static str;

    /// Shape `data` for transmission
    fn transmit(&self, data: &str) -> String;
}

/// WiFi: full, uncompressed payload
#[derive(Debug, Clone, Copy, Default)]
pub struct WiFiStrategy;

impl TransmissionStrategy for WiFiStrategy {
    fn name(&self) -> &'static str {
        "wifi"
    }

    fn transmit(&self, data: &str) -> String {
        data.to_string()
    }
}

/// LoRaWAN: payload cut to a quarter of its length (at least one character)
#[derive(Debug, Clone, Copy, Default)]
pub struct LoRaWanStrategy;

impl LoRaWanStrategy {
    pub const COMPRESSION_RATIO: f64 = 0.25;
}

impl TransmissionStrategy for LoRaWanStrategy {
    fn name(&self) -> &'static str {
        "lorawan"
    }

    fn transmit(&self, data: &str) -> String {
        if data.is_empty() {
            return String::new();
        }
        let chars = data.chars().count();
        let keep = ((chars as f64 * Self::COMPRESSION_RATIO) as usize).max(1);
        data.chars().take(keep).collect()
    }
}
