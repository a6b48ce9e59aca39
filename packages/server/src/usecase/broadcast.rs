//! フレームを複数の接続へ配信する共通処理

use tsudoi_shared::protocol::ChatFrame;

use crate::domain::{ConnectionId, FrameSender};

/// `frame` を `targets` の各チャンネルへ送る。届いた接続数を返す。
///
/// 送信に失敗したチャンネルは切断処理中の接続なので、ログに残して読み飛ばす。
pub fn broadcast(frame: &ChatFrame, targets: Vec<(ConnectionId, FrameSender)>) -> usize {
    let json = match frame.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to encode frame: {}", e);
            return 0;
        }
    };

    let mut delivered = 0;
    for (id, sender) in targets {
        if sender.send(json.clone()).is_ok() {
            delivered += 1;
        } else {
            tracing::warn!("Failed to send frame to connection '{}'", id);
        }
    }
    delivered
}
