//! ConsoleSubscriber - prints alerts to stdout

use std::io::Write;

use contracts::{AlertMessage, ContractError, Subscriber};

/// Subscriber that prints each alert as one line on stdout
pub struct ConsoleSubscriber {
    name: String,
}

impl ConsoleSubscriber {
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
        }
    }
}

impl Default for ConsoleSubscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscriber for ConsoleSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, message: &AlertMessage) -> Result<(), ContractError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{message}")?;
        Ok(())
    }
}
