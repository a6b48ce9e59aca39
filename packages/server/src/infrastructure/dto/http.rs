//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Participant entry for the participants endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub username: String,
    pub connected_at: String, // RFC 3339 (JST)
}
