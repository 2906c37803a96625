use std::collections::VecDeque;

use super::InboundMessage;

/// FIFO buffer of inbound messages awaiting a reply.
///
/// Owned exclusively by the dispatcher; messages are processed in exactly
/// the order they were fetched. An empty queue is a normal condition, not
/// an error, so `dequeue` signals it with `None`.
#[derive(Debug, Default)]
pub struct MessageQueue {
    messages: VecDeque<InboundMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail.
    pub fn enqueue(&mut self, message: InboundMessage) {
        self.messages.push_back(message);
    }

    /// Remove and return the head, or `None` when the queue is empty.
    pub fn dequeue(&mut self) -> Option<InboundMessage> {
        self.messages.pop_front()
    }

    pub fn size(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
