//! Domain entities - Core business objects with no external dependencies

pub mod account;
pub mod message;
pub mod queue;

pub use account::AccountInfo;
pub use message::{InboundMessage, ParsedCommand, ParsedInput};
pub use queue::MessageQueue;
