//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに新しい ID が割り当てられ、Repository に登録されることを保証
//! - 入室通知は本人以外の参加者にだけ届く（本人はクライアント側で入室通知を表示する）
//!
//! ### どのような状況を想定しているか
//! - 正常系：他の参加者がいる状態での接続
//! - エッジケース：最初の参加者の接続（通知先なし）

use std::sync::Arc;

use tsudoi_shared::protocol::{ChatFrame, join_notice};

use super::broadcast::broadcast;
use crate::domain::{
    ConnectionIdFactory, FrameSender, Participant, ParticipantRepository, Timestamp, Username,
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ParticipantRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 参加者を登録し、他の参加者へ入室通知を配信する
    ///
    /// # Arguments
    ///
    /// * `username` - 接続時に名乗った表示名
    /// * `sender` - この接続へのフレーム送信チャンネル
    ///
    /// # Returns
    ///
    /// 登録された参加者（新しい接続 ID を持つ）
    pub async fn execute(&self, username: Username, sender: FrameSender) -> Participant {
        let participant =
            Participant::new(ConnectionIdFactory::generate(), username, Timestamp::now());
        self.repository.add(participant.clone(), sender).await;

        let notice = ChatFrame::system(join_notice(participant.username.as_str()));
        let targets = self.repository.senders(Some(participant.id)).await;
        let delivered = broadcast(&notice, targets);
        tracing::info!(
            "Broadcasted join notice for '{}' to {} participants",
            participant.username,
            delivered
        );

        participant
    }
}
