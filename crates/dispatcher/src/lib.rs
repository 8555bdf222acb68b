//! # Dispatcher
//!
//! Alert distribution module.
//!
//! Responsibilities:
//! - Hold the subscriber list (`subscribe` / `unsubscribe` by identity)
//! - Broadcast `AlertMessage`s synchronously, in subscription order
//! - Provide log, console and channel subscribers

pub mod dispatcher;
pub mod metrics;
pub mod subscribers;

pub use contracts::{AlertMessage, Subscriber};
pub use dispatcher::AlertDispatcher;
pub use metrics::{DispatcherMetrics, MetricsSnapshot};
pub use subscribers::{ChannelSubscriber, ConsoleSubscriber, LogSubscriber};
