//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use tsudoi_shared::time::timestamp_to_jst_rfc3339;

use crate::{infrastructure::dto::http::ParticipantDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List of connected participants, oldest connection first
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<Vec<ParticipantDto>> {
    let participants = state.repository.participants().await;

    Json(
        participants
            .into_iter()
            .map(|p| ParticipantDto {
                username: p.username.as_str().to_string(),
                connected_at: timestamp_to_jst_rfc3339(p.connected_at.value())
                    .unwrap_or_default(),
            })
            .collect(),
    )
}
