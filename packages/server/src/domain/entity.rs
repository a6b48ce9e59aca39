//! Core domain models for the broadcast server.

use super::value_object::{ConnectionId, Timestamp, Username};

/// A connection currently registered in the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Connection identifier, unique per WebSocket
    pub id: ConnectionId,
    /// Name announced on connect
    pub username: Username,
    /// Timestamp when the participant connected
    pub connected_at: Timestamp,
}

impl Participant {
    pub fn new(id: ConnectionId, username: Username, connected_at: Timestamp) -> Self {
        Self {
            id,
            username,
            connected_at,
        }
    }
}
