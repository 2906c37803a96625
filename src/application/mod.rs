//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: the Command trait, registry and built-in handlers
//! - Messaging: message parsing and the dispatcher loop
//! - Errors: domain-specific errors

pub mod commands;
pub mod errors;
pub mod messaging;
