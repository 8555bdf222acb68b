//! Subscriber implementations
//!
//! Contains LogSubscriber, ConsoleSubscriber, and ChannelSubscriber.

mod channel;
mod console;
mod log;

pub use self::channel::ChannelSubscriber;
pub use self::console::ConsoleSubscriber;
pub use self::log::LogSubscriber;
