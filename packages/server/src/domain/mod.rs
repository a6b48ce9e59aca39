//! Domain layer for the broadcast server.
//!
//! This module contains the participant model and the repository seam,
//! independent of axum and the WebSocket details.

pub mod entity;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::Participant;
pub use factory::ConnectionIdFactory;
pub use repository::{FrameSender, ParticipantRepository};
pub use value_object::{ConnectionId, Timestamp, Username};
