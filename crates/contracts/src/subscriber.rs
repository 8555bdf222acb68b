//! Subscriber trait - alert dispatcher output interface

use crate::{AlertMessage, ContractError};

/// Alert receiver
///
/// Registered with the dispatcher by identity. `notify` runs synchronously on
/// the broadcasting thread, so implementations must not block.
pub trait Subscriber: Send + Sync {
    /// Subscriber name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Handle one alert
    ///
    /// # Errors
    /// Returned errors propagate out of the broadcast.
    fn notify(&self, message: &AlertMessage) -> Result<(), ContractError>;
}
