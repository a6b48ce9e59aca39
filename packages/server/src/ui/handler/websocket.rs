//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::Username,
    ui::state::{AppState, ConnectQuery},
    usecase::{ConnectParticipantUseCase, DisconnectParticipantUseCase, SendMessageUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    let username = Username::from_query(query.username.as_deref());
    ws.on_upgrade(move |socket| handle_socket(socket, state, username))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, username: Username) {
    // Create a channel for this client to receive broadcasts
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let participant = ConnectParticipantUseCase::new(state.repository.clone())
        .execute(username, tx)
        .await;
    let id = participant.id;
    tracing::info!("'{}' connected as '{}'", participant.username, id);

    let (mut sender, mut receiver) = socket.split();
    let send_message = SendMessageUseCase::new(state.repository.clone());

    // Spawn a task to receive frames from this client and broadcast them
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match send_message.execute(id, text.as_str()).await {
                    Ok(delivered) => {
                        tracing::debug!("Delivered frame from '{}' to {} connections", id, delivered);
                    }
                    Err(e) => tracing::warn!("Dropping frame from '{}': {}", id, e),
                },
                Message::Binary(bytes) => {
                    tracing::warn!("Dropping binary frame from '{}' ({} bytes)", id, bytes.len());
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to forward broadcasts to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(json) = rx.recv().await {
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Some(participant) = DisconnectParticipantUseCase::new(state.repository.clone())
        .execute(id)
        .await
    {
        tracing::info!("'{}' ({}) disconnected", participant.username, id);
    }
}
