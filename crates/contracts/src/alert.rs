//! AlertMessage - threshold breach notification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Critical,
}

/// Human-readable alert produced on a threshold breach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    text: String,
    severity: Severity,
}

impl AlertMessage {
    /// Create a critical alert
    pub fn critical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Critical,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
