use async_trait::async_trait;

use crate::application::errors::TransportError;
use crate::domain::entities::{AccountInfo, InboundMessage};

/// Receipt returned by the platform for a sent reply.
#[derive(Debug, Clone)]
pub struct Ack {
    pub message_id: String,
}

/// Transport trait - abstraction over the messaging platform.
///
/// The platform client (authentication, HTTP) lives behind this seam; the
/// dispatcher only ever talks to a `Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch direct messages newer than `since_id`, oldest first.
    ///
    /// `None` means no prior watermark: fetch everything available.
    async fn fetch_messages(
        &self,
        since_id: Option<u64>,
    ) -> Result<Vec<InboundMessage>, TransportError>;

    /// Send a reply to a sender.
    async fn send_reply(&self, recipient: &str, text: &str) -> Result<Ack, TransportError>;

    /// Profile of the account the bot is running as.
    async fn account_info(&self) -> Result<AccountInfo, TransportError>;
}
