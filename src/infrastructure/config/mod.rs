//! Configuration management
//!
//! The config file is one `KEY:value` pair per line. Blank lines and lines
//! starting with `#` are skipped; trailing whitespace on values is stripped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Template written by `init-config`.
pub const TEMPLATE: &str = "\
# herald-bot configuration
# Platform credentials (opaque to the bot core)
CONSUMER_KEY:your-consumer-key
CONSUMER_SECRET:your-consumer-secret
ACCESS_TOKEN:your-access-token
ACCESS_TOKEN_SECRET:your-access-token-secret

# Senders allowed to run privileged commands such as !shutdown
AUTHORIZED_USERS:console

# Single-line file holding the last processed message id
WATERMARK_FILE:data/last.txt

# Seconds to sleep between poll cycles
POLL_INTERVAL_SECS:60

BOT_NAME:herald-bot
";

/// Platform credentials, carried through to the transport adapter unread.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    /// True when every credential field is non-empty.
    pub fn is_complete(&self) -> bool {
        !(self.consumer_key.is_empty()
            || self.consumer_secret.is_empty()
            || self.access_token.is_empty()
            || self.access_token_secret.is_empty())
    }
}

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_name: String,
    pub credentials: Credentials,
    /// Allow-list of sender identifiers for privileged commands.
    pub authorized_users: Vec<String>,
    pub watermark_file: PathBuf,
    pub poll_interval: Duration,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut pairs = HashMap::new();
        for line in content.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once(':') {
                pairs.insert(key.to_string(), value.trim_end().to_string());
            }
        }

        let credentials = Credentials {
            consumer_key: required(&pairs, "CONSUMER_KEY")?,
            consumer_secret: required(&pairs, "CONSUMER_SECRET")?,
            access_token: required(&pairs, "ACCESS_TOKEN")?,
            access_token_secret: required(&pairs, "ACCESS_TOKEN_SECRET")?,
        };

        let authorized_users = required(&pairs, "AUTHORIZED_USERS")?
            .split(',')
            .map(|user| user.trim().to_string())
            .filter(|user| !user.is_empty())
            .collect();

        let watermark_file = PathBuf::from(required(&pairs, "WATERMARK_FILE")?);

        let poll_interval_secs = match pairs.get("POLL_INTERVAL_SECS") {
            Some(value) => value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: "POLL_INTERVAL_SECS".to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        let bot_name = pairs
            .get("BOT_NAME")
            .cloned()
            .unwrap_or_else(|| "herald-bot".to_string());

        Ok(Self {
            bot_name,
            credentials,
            authorized_users,
            watermark_file,
            poll_interval: Duration::from_secs(poll_interval_secs),
        })
    }

    /// Check if a sender may run privileged commands.
    pub fn is_authorized(&self, sender: &str) -> bool {
        self.authorized_users.iter().any(|user| user == sender)
    }
}

fn required(pairs: &HashMap<String, String>, key: &str) -> Result<String, ConfigError> {
    pairs
        .get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingField(key.to_string()))
}
