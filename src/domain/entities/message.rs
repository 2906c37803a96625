use serde::{Deserialize, Serialize};

/// A direct message received from the platform, immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform identifier of the sender (screen name or numeric id as text).
    pub sender: String,
    /// Message body as the sender typed it.
    pub text: String,
    /// Monotonically increasing platform-assigned id, used as the watermark.
    pub sequence_id: u64,
    /// Raw platform payload, kept for adapters that need fields the core
    /// does not model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, sequence_id: u64) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            sequence_id,
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = Some(raw);
        self
    }
}

/// A command token parsed out of an inbound message.
///
/// The name is lowercased and keeps its `!` prefix; arguments are the
/// remaining whitespace-separated tokens, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Result of parsing an inbound message's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// First token carried the command prefix.
    Command(ParsedCommand),
    /// Plain text (or empty text) without the command prefix.
    Plain,
}

impl ParsedInput {
    pub fn is_command(&self) -> bool {
        matches!(self, ParsedInput::Command(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_payload_is_optional_and_attachable() {
        let plain = InboundMessage::new("alice", "!hello", 1);
        assert!(plain.raw.is_none());

        let raw = serde_json::json!({ "id": 1, "text": "!hello" });
        let tagged = plain.with_raw(raw.clone());
        assert_eq!(tagged.raw, Some(raw));
    }
}
