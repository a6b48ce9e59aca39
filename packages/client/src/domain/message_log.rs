//! Ordered, append-only log of the messages shown to the user.
//!
//! Two producers feed the log: optimistic local sends and frames received
//! from the transport. Both are kept as distinct entries.

use super::{
    entity::{Message, Origin},
    value_object::{MessageId, Sender, Timestamp},
};

#[derive(Debug)]
pub struct MessageLog {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: MessageId::new(1),
        }
    }

    /// Append a message sent from this client. Returns immediately without
    /// waiting for the server.
    pub fn append_local(&mut self, sender: Sender, body: impl Into<String>) -> Message {
        self.append(sender, body.into(), Origin::Local)
    }

    /// Append a message that arrived through the transport.
    pub fn append_received(&mut self, sender: Sender, body: impl Into<String>) -> Message {
        self.append(sender, body.into(), Origin::Received)
    }

    /// Read-only view in log order.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn append(&mut self, sender: Sender, body: String, origin: Origin) -> Message {
        let id = self.next_id;
        self.next_id = id.next();

        let message = Message {
            id,
            sender,
            body,
            origin,
            created_at: Timestamp::now(),
        };
        self.messages.push(message.clone());
        message
    }
}
