//! Server state and connection query.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::ParticipantRepository;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub username: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn ParticipantRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ParticipantRepository>) -> Self {
        Self { repository }
    }
}
