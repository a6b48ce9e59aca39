//! UseCase 層のエラー定義

use thiserror::Error;

/// メッセージ送信のエラー
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// {user, body} の形をしていないフレーム
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// サーバーの通知用の送信者名を名乗るフレーム
    #[error("Frame claims the reserved sender '{0}'")]
    ReservedSender(String),
}
