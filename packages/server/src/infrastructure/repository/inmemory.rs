//! InMemory Participant Repository 実装
//!
//! ドメイン層が定義する ParticipantRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, FrameSender, Participant, ParticipantRepository};

struct Entry {
    participant: Participant,
    sender: FrameSender,
}

/// インメモリ Participant Repository 実装
#[derive(Default)]
pub struct InMemoryParticipantRepository {
    /// 接続中の参加者（WebSocket の送信チャンネルを含む）
    entries: Mutex<HashMap<ConnectionId, Entry>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn add(&self, participant: Participant, sender: FrameSender) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            participant.id,
            Entry {
                participant,
                sender,
            },
        );
    }

    async fn remove(&self, id: &ConnectionId) -> Option<Participant> {
        let mut entries = self.entries.lock().await;
        entries.remove(id).map(|entry| entry.participant)
    }

    async fn participants(&self) -> Vec<Participant> {
        let entries = self.entries.lock().await;
        let mut participants: Vec<Participant> = entries
            .values()
            .map(|entry| entry.participant.clone())
            .collect();
        participants.sort_by_key(|p| (p.connected_at, p.id));
        participants
    }

    async fn senders(&self, exclude: Option<ConnectionId>) -> Vec<(ConnectionId, FrameSender)> {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter(|(id, _)| Some(**id) != exclude)
            .map(|(id, entry)| (*id, entry.sender.clone()))
            .collect()
    }
}
