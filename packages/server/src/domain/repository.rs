//! Repository trait definitions.
//!
//! The room keeps, for each participant, the channel its WebSocket task
//! drains. Broadcasting means pushing one serialized frame into a set of
//! those channels.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{entity::Participant, value_object::ConnectionId};

/// Outbound channel of one connection
pub type FrameSender = UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Register a participant together with its outbound channel.
    async fn add(&self, participant: Participant, sender: FrameSender);

    /// Remove a participant. Returns it if it was registered.
    async fn remove(&self, id: &ConnectionId) -> Option<Participant>;

    /// All participants ordered by connection time.
    async fn participants(&self) -> Vec<Participant>;

    /// Outbound channels of every participant except `exclude`.
    async fn senders(&self, exclude: Option<ConnectionId>) -> Vec<(ConnectionId, FrameSender)>;
}
