//! ChannelSubscriber - forwards alerts into an async channel
//!
//! Lets async consumers process alerts at their own pace without ever
//! blocking the broadcasting thread.

use contracts::{AlertMessage, ContractError, Subscriber};
use tokio::sync::mpsc;
use tracing::trace;

/// Subscriber backed by an unbounded tokio channel
pub struct ChannelSubscriber {
    name: String,
    tx: mpsc::UnboundedSender<AlertMessage>,
}

impl ChannelSubscriber {
    /// Create the subscriber together with its receiving end
    pub fn new(name: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<AlertMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                name: name.into(),
                tx,
            },
            rx,
        )
    }
}

impl Subscriber for ChannelSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), ContractError> {
        self.tx
            .send(message.clone())
            .map_err(|_| ContractError::subscriber(&self.name, "receiver dropped"))?;
        trace!(subscriber = %self.name, "alert forwarded");
        Ok(())
    }
}
