//! Command handlers and the registry that dispatches to them

pub mod builtin;

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::traits::Transport;

pub use builtin::register_builtins;

/// Everything a command handler may touch while executing.
pub struct CommandContext<'a> {
    pub transport: &'a dyn Transport,
    pub registry: &'a CommandRegistry,
    /// Platform identifier of the user who sent the command.
    pub sender: &'a str,
}

/// A named unit of bot behavior, invoked as `!name` in a direct message.
#[async_trait]
pub trait Command: Send + Sync {
    /// Command name including the `!` prefix, lowercased.
    fn name(&self) -> &str;

    /// One-line usage description shown by `!help`.
    fn help(&self) -> String;

    /// Privileged commands are only executable by allow-listed senders.
    fn privileged(&self) -> bool {
        false
    }

    /// Run the command and produce the reply text for the sender.
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> Result<String, CommandError>;
}

/// Registry mapping command names to handlers.
///
/// Storage is insertion-ordered so `!help` output is deterministic.
/// Registering a name twice overwrites the previous binding
/// (last-registration-wins, deliberately) while keeping the original slot.
pub struct CommandRegistry {
    entries: Vec<(String, Arc<dyn Command>)>,
    fallback: Arc<dyn Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: Arc::new(builtin::Unknown),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = command;
        } else {
            self.entries.push((name, command));
        }
    }

    /// Exact-match lookup on the normalized (lowercased, `!`-prefixed) name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, cmd)| cmd)
    }

    /// All registered commands, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.entries.iter().map(|(_, cmd)| cmd)
    }

    /// The designated handler for commands not found in the registry.
    pub fn fallback(&self) -> &Arc<dyn Command> {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
