//! Message handling - parsing and the poll/drain loop

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{Dispatcher, LoopState};
pub use parser::MessageParser;
