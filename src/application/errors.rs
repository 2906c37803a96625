//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures talking to the messaging platform.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The platform throttled us; retry on the next poll cycle.
    #[error("rate limited by the platform")]
    RateLimited,

    #[error("transport failure: {0}")]
    Failed(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error("transport failure during command: {0}")]
    Transport(#[from] TransportError),
}

/// Watermark persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed watermark: {0}")]
    Malformed(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
