//! Message dispatcher - polls the transport, drains the queue, replies

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::application::commands::{Command, CommandContext, CommandRegistry};
use crate::application::errors::{BotError, TransportError};
use crate::domain::entities::{InboundMessage, MessageQueue, ParsedInput};
use crate::domain::traits::Transport;
use crate::infrastructure::watermark::WatermarkStore;

use super::parser::MessageParser;

/// Advisory sent when a message does not start with the command prefix.
pub const MISSING_PREFIX_REPLY: &str = "I'm sorry, I only accept commands, which start with ! :(";

/// Generic reply when a handler fails unexpectedly.
pub const FAILURE_REPLY: &str =
    "Something went wrong while running that command, please try again later.";

/// Phase of the poll/drain loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Fetching,
    Draining,
    Stopped,
}

/// Single-threaded poll/execute loop.
///
/// Owns the queue, the registry and the watermark outright; nothing else
/// mutates them. One cycle is fetch, drain, persist, sleep. The cooperative
/// stop flag (set by `!shutdown` or the host) is only observed between
/// cycles, never mid-drain.
pub struct Dispatcher<T: Transport> {
    transport: T,
    registry: CommandRegistry,
    parser: MessageParser,
    queue: MessageQueue,
    watermark_store: WatermarkStore,
    watermark: Option<u64>,
    authorized: Vec<String>,
    poll_interval: Duration,
    stop: Arc<AtomicBool>,
    state: LoopState,
}

impl<T: Transport> Dispatcher<T> {
    /// Build a dispatcher, reading any prior watermark from disk.
    pub fn new(
        transport: T,
        registry: CommandRegistry,
        watermark_store: WatermarkStore,
        authorized: Vec<String>,
        poll_interval: Duration,
        stop: Arc<AtomicBool>,
    ) -> Result<Self, BotError> {
        let watermark = watermark_store.load()?;
        Ok(Self {
            transport,
            registry,
            parser: MessageParser::new(),
            queue: MessageQueue::new(),
            watermark_store,
            watermark,
            authorized,
            poll_interval,
            stop,
            state: LoopState::Idle,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn watermark(&self) -> Option<u64> {
        self.watermark
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Run cycles until a shutdown is requested.
    pub async fn run(&mut self) -> Result<(), BotError> {
        tracing::info!(watermark = ?self.watermark, "dispatcher starting");
        while !self.stop_requested() {
            self.run_cycle().await;
            if self.stop_requested() {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        self.transition(LoopState::Stopped);
        self.persist_watermark();
        tracing::info!("dispatcher stopped");
        Ok(())
    }

    /// One fetch/drain/persist pass.
    pub async fn run_cycle(&mut self) {
        tracing::debug!("cycle start");
        self.transition(LoopState::Fetching);
        match self.transport.fetch_messages(self.watermark).await {
            Ok(batch) => {
                for message in batch {
                    // Batches arrive oldest-first, so the last id wins.
                    self.watermark = Some(message.sequence_id);
                    self.queue.enqueue(message);
                }
            }
            Err(TransportError::RateLimited) => {
                tracing::warn!("rate limited while fetching, skipping this cycle");
                self.transition(LoopState::Idle);
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "fetch failed, skipping this cycle");
                self.transition(LoopState::Idle);
                return;
            }
        }

        self.transition(LoopState::Draining);
        self.drain().await;
        self.persist_watermark();
        self.transition(LoopState::Idle);
        tracing::debug!("cycle end");
    }

    /// Empty the queue, replying to every message in queue order.
    async fn drain(&mut self) {
        while self.queue.size() > 0 {
            let Some(message) = self.queue.dequeue() else {
                break;
            };
            let reply = self.reply_for(&message).await;
            if let Err(e) = self.transport.send_reply(&message.sender, &reply).await {
                // Drop only this reply; the rest of the queue still drains.
                tracing::error!(recipient = %message.sender, error = %e, "failed to send reply");
            }
        }
    }

    /// Compute the one reply this message gets.
    async fn reply_for(&self, message: &InboundMessage) -> String {
        let command = match self.parser.parse(&message.text) {
            ParsedInput::Plain => return MISSING_PREFIX_REPLY.to_string(),
            ParsedInput::Command(command) => command,
        };

        let handler = match self.registry.lookup(&command.name) {
            Some(handler) => handler,
            None => {
                tracing::info!(sender = %message.sender, command = %command.name, "unknown command");
                self.registry.fallback()
            }
        };

        // Privileged commands never execute for unlisted senders.
        let handler = if handler.privileged() && !self.is_authorized(&message.sender) {
            tracing::warn!(
                sender = %message.sender,
                command = %command.name,
                "privileged command from unauthorized sender"
            );
            self.registry.fallback()
        } else {
            handler
        };

        let ctx = CommandContext {
            transport: &self.transport,
            registry: &self.registry,
            sender: &message.sender,
        };
        match handler.execute(&ctx, &command.args).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(command = %command.name, error = %e, "command execution failed");
                FAILURE_REPLY.to_string()
            }
        }
    }

    fn is_authorized(&self, sender: &str) -> bool {
        self.authorized.iter().any(|user| user == sender)
    }

    fn persist_watermark(&self) {
        let Some(id) = self.watermark else {
            return;
        };
        if let Err(e) = self.watermark_store.store(id) {
            tracing::error!(error = %e, "failed to persist watermark");
        }
    }

    fn transition(&mut self, state: LoopState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "state transition");
            self.state = state;
        }
    }
}
