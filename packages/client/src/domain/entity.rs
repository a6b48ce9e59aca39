//! Core domain models for the chat client.

use super::value_object::{MessageId, Sender, Timestamp};

/// Where a message entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Sent from this client and shown optimistically
    Local,
    /// Arrived through the transport (including the echo of our own sends)
    Received,
}

/// A delivered or pending chat entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Position in the log; strictly increasing
    pub id: MessageId,
    pub sender: Sender,
    pub body: String,
    pub origin: Origin,
    /// When the entry was appended to the log
    pub created_at: Timestamp,
}

impl Message {
    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }

    /// Whether this entry is a system notice rather than a chat bubble
    pub fn is_system_notice(&self) -> bool {
        self.sender.is_system()
    }
}
