//! LogSubscriber - records alerts via tracing

use contracts::{AlertMessage, ContractError, Subscriber};
use tracing::warn;

/// Subscriber that logs every alert at WARN level
pub struct LogSubscriber {
    name: String,
}

impl LogSubscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Subscriber for LogSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), ContractError> {
        warn!(
            subscriber = %self.name,
            severity = ?message.severity(),
            alert = %message,
            "alert received"
        );
        Ok(())
    }
}
