//! Domain factories for creating identifiers.

use uuid::Uuid;

use super::value_object::ConnectionId;

/// Factory for generating ConnectionId instances.
///
/// Keeps id generation out of the value object so that tests can build
/// connection ids from known UUIDs.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}
