//! Transport channel implementations.

pub mod backoff;
pub mod websocket;

pub use backoff::ReconnectPolicy;
pub use websocket::{DEFAULT_CONNECT_TIMEOUT, TransportConfig, WebSocketTransport, decode_frame};
