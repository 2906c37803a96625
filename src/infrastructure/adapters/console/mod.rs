//! Console transport for development/testing
//!
//! Each line typed on stdin becomes one direct message from the sender
//! `console`; replies are printed instead of sent.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::errors::TransportError;
use crate::domain::entities::{AccountInfo, InboundMessage};
use crate::domain::traits::{Ack, Transport};

/// Sender identifier attached to every console message.
pub const CONSOLE_SENDER: &str = "console";

pub struct ConsoleTransport {
    bot_name: String,
    started_at: DateTime<Utc>,
    next_seq: AtomicU64,
}

impl ConsoleTransport {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            started_at: Utc::now(),
            next_seq: AtomicU64::new(1),
        }
    }

    fn read_line(&self) -> Result<Option<String>, TransportError> {
        print!("[{}] ", CONSOLE_SENDER);
        std::io::stdout()
            .flush()
            .map_err(|e| TransportError::Failed(e.to_string()))?;

        let mut input = String::new();
        let read = std::io::stdin()
            .read_line(&mut input)
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn fetch_messages(
        &self,
        _since_id: Option<u64>,
    ) -> Result<Vec<InboundMessage>, TransportError> {
        match self.read_line()? {
            Some(line) if line.is_empty() => Ok(Vec::new()),
            Some(line) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                Ok(vec![InboundMessage::new(CONSOLE_SENDER, line, seq)])
            }
            None => Err(TransportError::Failed("stdin closed".to_string())),
        }
    }

    async fn send_reply(&self, _recipient: &str, text: &str) -> Result<Ack, TransportError> {
        println!("[BOT] {}", text);
        Ok(Ack {
            message_id: "console_msg".to_string(),
        })
    }

    async fn account_info(&self) -> Result<AccountInfo, TransportError> {
        Ok(AccountInfo {
            screen_name: self.bot_name.clone(),
            description: "console development session".to_string(),
            friend_count: 0,
            created_at: self.started_at,
            verified: false,
            url: "https://localhost/console".to_string(),
        })
    }
}
