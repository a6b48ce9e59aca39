//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 受け取ったフレームは送信者を含む全員に配信される（クライアントはこのエコーを前提にしている）
//! - 形の崩れたフレームは誰にも配信されない
//! - System を名乗るフレームは入退室通知と区別できないため配信されない
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数参加者への配信
//! - 異常系：JSON でない、フィールドが欠けたフレーム、System を名乗るフレーム

use std::sync::Arc;

use tsudoi_shared::protocol::ChatFrame;

use super::{broadcast::broadcast, error::SendMessageError};
use crate::domain::{ConnectionId, ParticipantRepository};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ParticipantRepository>,
}

impl SendMessageUseCase {
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }

    /// 受信したテキストフレームを全参加者へ配信する
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 配信できた接続数
    /// * `Err(SendMessageError)` - フレームが {user, body} として読めない、または System を名乗っている
    pub async fn execute(&self, from: ConnectionId, text: &str) -> Result<usize, SendMessageError> {
        let frame = ChatFrame::from_json(text)?;
        if frame.is_system() {
            return Err(SendMessageError::ReservedSender(frame.sender_name().to_string()));
        }
        tracing::debug!(
            "Broadcasting message from '{}' (connection '{}')",
            frame.sender_name(),
            from
        );

        let targets = self.repository.senders(None).await;
        Ok(broadcast(&frame, targets))
    }
}
