//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した参加者が Repository から取り除かれることを保証
//! - 残っている参加者に退室通知が届く
//!
//! ### どのような状況を想定しているか
//! - 正常系：他の参加者がいる状態での切断
//! - エッジケース：既に取り除かれた接続の二重切断

use std::sync::Arc;

use tsudoi_shared::protocol::{ChatFrame, leave_notice};

use super::broadcast::broadcast;
use crate::domain::{ConnectionId, Participant, ParticipantRepository};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    repository: Arc<dyn ParticipantRepository>,
}

impl DisconnectParticipantUseCase {
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 参加者を取り除き、残りの参加者へ退室通知を配信する
    ///
    /// 登録されていない接続なら何もせず None を返す。
    pub async fn execute(&self, id: ConnectionId) -> Option<Participant> {
        let participant = self.repository.remove(&id).await?;

        let notice = ChatFrame::system(leave_notice(participant.username.as_str()));
        let delivered = broadcast(&notice, self.repository.senders(None).await);
        tracing::info!(
            "Broadcasted leave notice for '{}' to {} participants",
            participant.username,
            delivered
        );

        Some(participant)
    }
}
