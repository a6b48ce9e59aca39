//! Shared building blocks for the Tsudoi chat server and client.
//!
//! - [`logger`]: tracing subscriber bootstrap used by both binaries
//! - [`time`]: timestamp helpers
//! - [`protocol`]: the `{user, body}` frame exchanged over the WebSocket

pub mod logger;
pub mod protocol;
pub mod time;
