//! Transport channel interface.
//!
//! One instance owns at most one live connection. Inbound frames and state
//! changes are not returned from these methods; they arrive as
//! [`TransportEvent`](super::TransportEvent)s on the channel the transport was
//! created with.

use async_trait::async_trait;

use super::{connection::ConnectionState, entity::Message, value_object::DisplayName};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send {
    /// Open a connection announced under `identity` and wait until it is
    /// `Open` or `Closed`. Failures never surface as errors, only as state.
    async fn connect(&mut self, identity: &DisplayName) -> ConnectionState;

    /// Hand a message to the connection. Dropped (returns `false`) unless
    /// the connection is `Open`.
    fn send(&self, message: &Message) -> bool;

    /// Shut the connection down. Idempotent.
    fn close(&mut self);

    fn state(&self) -> ConnectionState;
}
