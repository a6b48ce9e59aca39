//! UseCase: チャットセッション
//!
//! 表示名・メッセージログ・トランスポートを 1 つのセッションにまとめ、
//! プレゼンテーション層（CLI など）からはこのセッションだけを操作します。
//! 接続はプロセス全体で共有せず、セッションが所有します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatSession::send_text() / apply_event() / next_update() / connect()
//!
//! ### なぜこのテストが必要か
//! - 送信したメッセージはサーバーの応答を待たずに即座にログへ追加される
//! - 空白のみの入力はログにもトランスポートにも届かない
//! - 受信イベントは到着順にログへ反映される
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信、受信、接続時の入室通知
//! - エッジケース：空白のみの入力、未接続時の送信、エコー抑制の有無

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tsudoi_shared::protocol::join_notice;

use super::identity::{IdentityStore, ResolvedIdentity};
use crate::domain::{
    ConnectionState, DisplayName, EchoPolicy, EchoTracker, Message, MessageLog, Sender, Timestamp,
    Transport, TransportEvent,
};

/// プレゼンテーション層への描画トリガー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// 接続状態が変わった
    StateChanged(ConnectionState),
    /// ログにメッセージが追加された（受信メッセージ・入室通知）
    MessageAppended(Message),
}

/// クライアントのトップレベルセッション
pub struct ChatSession<T: Transport> {
    identity_store: IdentityStore,
    identity: Option<DisplayName>,
    transport: T,
    events: mpsc::UnboundedReceiver<TransportEvent>,
    log: MessageLog,
    echo: EchoTracker,
    pending: VecDeque<SessionUpdate>,
}

impl<T: Transport> ChatSession<T> {
    /// 新しいセッションを作成
    ///
    /// `events` はトランスポートが状態変化と受信メッセージを流すチャンネル。
    pub fn new(
        identity_store: IdentityStore,
        transport: T,
        events: mpsc::UnboundedReceiver<TransportEvent>,
    ) -> Self {
        Self {
            identity_store,
            identity: None,
            transport,
            events,
            log: MessageLog::new(),
            echo: EchoTracker::new(EchoPolicy::Display),
            pending: VecDeque::new(),
        }
    }

    /// エコー（自分の送信の折り返し）の扱いを設定
    #[must_use]
    pub fn with_echo_policy(mut self, policy: EchoPolicy) -> Self {
        self.echo = EchoTracker::new(policy);
        self
    }

    /// 保存済みの表示名を読み込む。保存済みならそのままセッションの表示名になる。
    pub async fn resolve_identity(&mut self) -> ResolvedIdentity {
        let resolved = self.identity_store.resolve().await;
        if let Some(name) = &resolved.name {
            self.identity = Some(name.clone());
        }
        resolved
    }

    /// 表示名を確定する（空入力は候補名にフォールバック）
    pub async fn commit_identity(&mut self, chosen: &str) -> DisplayName {
        let name = self.identity_store.commit(chosen).await;
        self.identity = Some(name.clone());
        name
    }

    pub fn identity(&self) -> Option<&DisplayName> {
        self.identity.as_ref()
    }

    /// 確定済みの表示名で接続し、Open か Closed になるまで待つ
    ///
    /// 表示名が未確定の場合は候補名で確定してから接続する。
    pub async fn connect(&mut self) -> ConnectionState {
        let identity = match self.identity.clone() {
            Some(identity) => identity,
            None => {
                tracing::info!("No display name committed yet, using the suggestion");
                self.commit_identity("").await
            }
        };
        self.transport.connect(&identity).await
    }

    /// テキストを送信する
    ///
    /// 空白のみの入力は無視する（ログにもトランスポートにも渡さない）。
    /// それ以外はサーバーの応答を待たずにログへ追加し、同時にトランスポートへ渡す。
    /// 未接続で送信できなかった場合もログのエントリは残る。
    pub fn send_text(&mut self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank message");
            return None;
        }

        let sender = Sender::from(&self.sender_name());
        let message = self.log.append_local(sender.clone(), text);

        if self.transport.send(&message) {
            self.echo.record_sent(&sender, text, message.created_at);
        } else {
            tracing::debug!("Message {} shown locally only: not connected", message.id);
        }
        Some(message)
    }

    /// トランスポートからのイベントをログと描画トリガーに反映する
    pub fn apply_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::StateChanged(state) => {
                let opened = state.is_open();
                if matches!(state, ConnectionState::Closed(_)) {
                    self.echo.clear();
                }
                self.pending.push_back(SessionUpdate::StateChanged(state));

                if opened {
                    let notice = join_notice(self.sender_name().as_str());
                    let message = self.log.append_received(Sender::System, notice);
                    self.pending.push_back(SessionUpdate::MessageAppended(message));
                }
            }
            TransportEvent::Message(incoming) => {
                if self
                    .echo
                    .take_echo(&incoming.sender, &incoming.body, Timestamp::now())
                {
                    tracing::debug!("Suppressed echo of own message from '{}'", incoming.sender);
                    return;
                }
                let message = self.log.append_received(incoming.sender, incoming.body);
                self.pending.push_back(SessionUpdate::MessageAppended(message));
            }
        }
    }

    /// 次の描画トリガーを待つ
    ///
    /// トランスポートのイベントチャンネルが閉じると None を返す。
    pub async fn next_update(&mut self) -> Option<SessionUpdate> {
        loop {
            if let Some(update) = self.pending.pop_front() {
                return Some(update);
            }
            let event = self.events.recv().await?;
            self.apply_event(event);
        }
    }

    /// 描画用のメッセージ一覧（到着順）
    pub fn snapshot(&self) -> &[Message] {
        self.log.snapshot()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.transport.state()
    }

    /// 接続を閉じる（何度呼んでもよい）
    pub fn close(&mut self) {
        self.transport.close();
    }

    fn sender_name(&self) -> DisplayName {
        self.identity
            .clone()
            .or_else(|| self.identity_store.last_suggestion().cloned())
            .unwrap_or_else(DisplayName::anonymous)
    }
}
