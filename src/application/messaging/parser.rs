//! Message parser - Turns raw direct-message text into a command invocation

use crate::domain::entities::{ParsedCommand, ParsedInput};

/// The reserved leading character that marks a token as a command name.
pub const COMMAND_PREFIX: char = '!';

/// Parses inbound message text by whitespace tokenization.
pub struct MessageParser {
    prefix: char,
}

impl MessageParser {
    pub fn new() -> Self {
        Self {
            prefix: COMMAND_PREFIX,
        }
    }

    /// Parse one message body.
    ///
    /// The first token names the command and is lowercased (prefix kept);
    /// the remaining tokens become the arguments untouched. Text whose
    /// first token lacks the prefix, including empty text, is `Plain`.
    pub fn parse(&self, text: &str) -> ParsedInput {
        let mut tokens = text.split_whitespace();
        let Some(first) = tokens.next() else {
            return ParsedInput::Plain;
        };
        if !first.starts_with(self.prefix) {
            return ParsedInput::Plain;
        }

        ParsedInput::Command(ParsedCommand {
            name: first.to_lowercase(),
            args: tokens.map(str::to_string).collect(),
        })
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}
