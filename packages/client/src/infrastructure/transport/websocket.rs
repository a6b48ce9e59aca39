//! WebSocket transport channel.
//!
//! [`WebSocketTransport`] is a thin handle. The socket itself lives in a
//! spawned task that bridges an outbound mpsc channel and the WebSocket, and
//! publishes every state change and decoded frame as a [`TransportEvent`] on
//! one ordered channel.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpStream,
    sync::{
        mpsc::{self, error::TryRecvError},
        watch,
    },
    task::JoinHandle,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message as WsMessage,
};
use tsudoi_shared::protocol::{ChatFrame, USERNAME_QUERY_PARAM};

use super::backoff::ReconnectPolicy;
use crate::domain::{
    CloseReason, ConnectionState, DisplayName, IncomingMessage, Message, Sender, Transport,
    TransportEvent,
};

/// Default upper bound for one connect attempt
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to connect
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Server endpoint, e.g. `ws://localhost:8080/ws`
    pub url: String,
    pub connect_timeout: Duration,
    pub reconnect: ReconnectPolicy,
}

impl TransportConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            reconnect: ReconnectPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// Endpoint URL announcing `identity` as a query parameter.
    pub fn connect_url(&self, identity: &DisplayName) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}{USERNAME_QUERY_PARAM}={}",
            self.url,
            urlencoding::encode(identity.as_str())
        )
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Commands from the handle to the connection task
#[derive(Debug)]
enum Outbound {
    Frame(ChatFrame),
    Close,
}

/// Transport channel backed by a WebSocket connection
pub struct WebSocketTransport {
    config: TransportConfig,
    events: mpsc::UnboundedSender<TransportEvent>,
    state: Arc<watch::Sender<ConnectionState>>,
    outbound: Option<mpsc::UnboundedSender<Outbound>>,
    task: Option<JoinHandle<()>>,
}

impl WebSocketTransport {
    /// Create a disconnected transport and the receiver its events arrive on.
    pub fn new(config: TransportConfig) -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        let transport = Self {
            config,
            events: events_tx,
            state: Arc::new(state_tx),
            outbound: None,
            task: None,
        };
        (transport, events_rx)
    }

    /// Close the current connection (if any) and wait for its task to end so
    /// that its final events are published before a new connection starts.
    async fn shutdown_live_connection(&mut self) {
        self.close();
        if let Some(task) = self.task.take() {
            let abort = task.abort_handle();
            if tokio::time::timeout(self.config.connect_timeout, task)
                .await
                .is_err()
            {
                tracing::warn!("Previous connection did not shut down in time, aborting it");
                abort.abort();
            }
        }
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn connect(&mut self, identity: &DisplayName) -> ConnectionState {
        self.shutdown_live_connection().await;

        let url = self.config.connect_url(identity);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        publish(&self.state, &self.events, ConnectionState::Connecting);
        let mut state_rx = self.state.subscribe();

        self.task = Some(tokio::spawn(run_connection(
            url,
            self.config.clone(),
            outbound_rx,
            self.events.clone(),
            Arc::clone(&self.state),
        )));
        self.outbound = Some(outbound_tx);

        match state_rx.wait_for(ConnectionState::is_settled).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.state(),
        }
    }

    fn send(&self, message: &Message) -> bool {
        let state = self.state();
        if !state.is_open() {
            tracing::debug!("Dropping message {}: connection is {}", message.id, state);
            return false;
        }
        let Some(outbound) = &self.outbound else {
            return false;
        };
        let frame = ChatFrame::new(message.sender.name(), message.body.clone());
        outbound.send(Outbound::Frame(frame)).is_ok()
    }

    fn close(&mut self) {
        if let Some(outbound) = self.outbound.take() {
            tracing::info!("Closing connection");
            // The task may already have ended on its own; nothing to do then.
            let _ = outbound.send(Outbound::Close);
        }
    }

    fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }
}

fn publish(
    state: &watch::Sender<ConnectionState>,
    events: &mpsc::UnboundedSender<TransportEvent>,
    new_state: ConnectionState,
) {
    tracing::debug!("Connection state: {}", new_state);
    state.send_replace(new_state.clone());
    // The session may be gone; the state above is still readable.
    let _ = events.send(TransportEvent::StateChanged(new_state));
}

/// Connection task: connect, pump frames, and reconnect per policy until
/// the handle asks to close or the attempts run out.
async fn run_connection(
    url: String,
    config: TransportConfig,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    events: mpsc::UnboundedSender<TransportEvent>,
    state: Arc<watch::Sender<ConnectionState>>,
) {
    let mut attempt: u32 = 0;

    loop {
        if attempt > 0 {
            publish(&state, &events, ConnectionState::Connecting);
        }
        tracing::info!("Connecting to {}", url);

        let connected = tokio::select! {
            result = tokio::time::timeout(config.connect_timeout, connect_async(url.as_str())) => Some(result),
            () = wait_for_close(&mut outbound) => None,
        };

        let reason = match connected {
            None => CloseReason::ClientShutdown,
            Some(Err(_elapsed)) => CloseReason::TimedOut,
            Some(Ok(Err(e))) => CloseReason::NetworkError(e.to_string()),
            Some(Ok(Ok((socket, _response)))) => {
                tracing::info!("Connected to {}", url);
                publish(&state, &events, ConnectionState::Open);
                attempt = 0;

                let reason = pump(socket, &mut outbound, &events).await;
                if discard_pending(&mut outbound) {
                    CloseReason::ClientShutdown
                } else {
                    reason
                }
            }
        };

        if reason == CloseReason::ClientShutdown {
            tracing::info!("Connection closed by client");
            publish(&state, &events, ConnectionState::Closed(reason));
            return;
        }

        tracing::warn!("Connection lost: {}", reason);
        publish(&state, &events, ConnectionState::Closed(reason));

        attempt += 1;
        let Some(delay) = config.reconnect.next_delay(attempt) else {
            if config.reconnect.is_enabled() {
                tracing::warn!(
                    "Giving up after {} reconnect attempts",
                    config.reconnect.max_attempts
                );
            }
            return;
        };

        tracing::info!(
            "Reconnecting in {}ms (attempt {}/{})",
            delay.as_millis(),
            attempt,
            config.reconnect.max_attempts
        );
        let cancelled = tokio::select! {
            () = tokio::time::sleep(delay) => false,
            () = wait_for_close(&mut outbound) => true,
        };
        if cancelled {
            publish(
                &state,
                &events,
                ConnectionState::Closed(CloseReason::ClientShutdown),
            );
            return;
        }
    }
}

/// Bridge one open socket until it closes. Returns why it closed.
async fn pump(
    socket: Socket,
    outbound: &mut mpsc::UnboundedReceiver<Outbound>,
    events: &mpsc::UnboundedSender<TransportEvent>,
) -> CloseReason {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => deliver(text.as_str(), events),
                Some(Ok(WsMessage::Binary(bytes))) => {
                    tracing::warn!("Dropping binary frame ({} bytes)", bytes.len());
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.as_str().to_string())
                        .filter(|reason| !reason.is_empty());
                    return CloseReason::ServerClosed(reason);
                }
                // Ping/pong are answered by tungstenite itself
                Some(Ok(_)) => {}
                Some(Err(e)) => return CloseReason::NetworkError(e.to_string()),
                None => return CloseReason::ServerClosed(None),
            },
            command = outbound.recv() => match command {
                Some(Outbound::Frame(frame)) => match frame.to_json() {
                    Ok(json) => {
                        tracing::debug!("Sending frame: {}", json);
                        if let Err(e) = sink.send(WsMessage::Text(json.into())).await {
                            return CloseReason::NetworkError(e.to_string());
                        }
                    }
                    Err(e) => tracing::warn!("Failed to encode frame: {}", e),
                },
                Some(Outbound::Close) | None => {
                    if let Err(e) = sink.send(WsMessage::Close(None)).await {
                        tracing::debug!("Failed to send close frame: {}", e);
                    }
                    return CloseReason::ClientShutdown;
                }
            },
        }
    }
}

fn deliver(text: &str, events: &mpsc::UnboundedSender<TransportEvent>) {
    match decode_frame(text) {
        Ok(message) => {
            tracing::debug!("Received message from '{}'", message.sender);
            let _ = events.send(TransportEvent::Message(message));
        }
        Err(e) => tracing::warn!("Dropping malformed frame: {} (payload: {})", e, text),
    }
}

/// Decode an inbound text frame into a domain message.
pub fn decode_frame(text: &str) -> Result<IncomingMessage, serde_json::Error> {
    let frame = ChatFrame::from_json(text)?;
    Ok(IncomingMessage {
        sender: Sender::from_wire(frame.user.as_deref()),
        body: frame.body,
    })
}

/// Wait until the handle asks to close, dropping any frames sent meanwhile
/// (they were never accepted while the connection was not open).
async fn wait_for_close(outbound: &mut mpsc::UnboundedReceiver<Outbound>) {
    while let Some(command) = outbound.recv().await {
        match command {
            Outbound::Close => return,
            Outbound::Frame(_) => tracing::debug!("Dropping frame: connection is not open"),
        }
    }
}

/// Drop frames still queued for a connection that is gone. Returns `true` if
/// a close was requested in the meantime.
fn discard_pending(outbound: &mut mpsc::UnboundedReceiver<Outbound>) -> bool {
    let mut dropped = 0usize;
    let close_requested = loop {
        match outbound.try_recv() {
            Ok(Outbound::Frame(_)) => dropped += 1,
            Ok(Outbound::Close) | Err(TryRecvError::Disconnected) => break true,
            Err(TryRecvError::Empty) => break false,
        }
    };
    if dropped > 0 {
        tracing::debug!("Discarded {} unsent frames", dropped);
    }
    close_requested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageLog;

    #[test]
    fn test_connect_url_encodes_identity() {
        // テスト項目: 接続 URL に表示名が URL エンコードされて付与される
        // given (前提条件):
        let config = TransportConfig::new("ws://localhost:8080/ws");
        let identity = DisplayName::new("Nifty Narwhal & co").unwrap();

        // when (操作):
        let url = config.connect_url(&identity);

        // then (期待する結果):
        assert_eq!(
            url,
            "ws://localhost:8080/ws?username=Nifty%20Narwhal%20%26%20co"
        );
    }

    #[test]
    fn test_connect_url_appends_to_existing_query() {
        // テスト項目: 既にクエリがある URL には & で追加される
        // given (前提条件):
        let config = TransportConfig::new("ws://localhost:8080/ws?room=default");
        let identity = DisplayName::new("Alice").unwrap();

        // when (操作):
        let url = config.connect_url(&identity);

        // then (期待する結果):
        assert_eq!(url, "ws://localhost:8080/ws?room=default&username=Alice");
    }

    #[test]
    fn test_decode_frame() {
        // テスト項目: 受信フレームがドメインのメッセージに変換される
        // when (操作):
        let message = decode_frame(r#"{"user":"Bob","body":"hello"}"#).unwrap();
        let system = decode_frame(r#"{"user":"System","body":"Bob just entered the chat room"}"#)
            .unwrap();
        let anonymous = decode_frame(r#"{"body":"who am i"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(message.sender, Sender::User("Bob".to_string()));
        assert_eq!(message.body, "hello");
        assert_eq!(system.sender, Sender::System);
        assert_eq!(anonymous.sender.name(), "Anonymous");
    }

    #[test]
    fn test_decode_malformed_frame_fails() {
        // テスト項目: 想定外の形のフレームはデコードに失敗する
        // then (期待する結果):
        assert!(decode_frame("hello").is_err());
        assert!(decode_frame(r#"{"user":"Bob"}"#).is_err());
    }

    #[tokio::test]
    async fn test_send_while_disconnected_is_dropped() {
        // テスト項目: Open でない間の送信は破棄され、送信チャンネルにも流れない
        // given (前提条件):
        let (transport, mut events) =
            WebSocketTransport::new(TransportConfig::new("ws://127.0.0.1:9/ws"));
        let mut log = MessageLog::new();
        let message = log.append_local(Sender::User("Alice".to_string()), "hi");

        // when (操作):
        let sent = transport.send(&message);

        // then (期待する結果):
        assert!(!sent);
        assert_eq!(transport.state(), ConnectionState::Disconnected);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_before_connect_is_noop() {
        // テスト項目: 接続前の close は何もせず、何度呼んでもよい
        // given (前提条件):
        let (mut transport, mut events) =
            WebSocketTransport::new(TransportConfig::new("ws://127.0.0.1:9/ws"));

        // when (操作):
        transport.close();
        transport.close();

        // then (期待する結果):
        assert_eq!(transport.state(), ConnectionState::Disconnected);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_discard_pending_reports_close() {
        // テスト項目: 切断後に残ったフレームは破棄され、close 要求は検出される
        // given (前提条件):
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(Outbound::Frame(ChatFrame::new("Alice", "1"))).unwrap();
        tx.send(Outbound::Frame(ChatFrame::new("Alice", "2"))).unwrap();

        // when (操作):
        let without_close = discard_pending(&mut rx);
        tx.send(Outbound::Close).unwrap();
        let with_close = discard_pending(&mut rx);

        // then (期待する結果):
        assert!(!without_close);
        assert!(with_close);
        assert!(rx.try_recv().is_err());
    }
}
