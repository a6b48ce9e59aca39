//! Connection lifecycle types observed by the session.

use std::fmt;

use super::value_object::Sender;

/// Why a connection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// `close()` was called, or the session went away
    ClientShutdown,
    /// The server closed the connection, with its reason if it sent one
    ServerClosed(Option<String>),
    /// Connection refused, dropped, or failed mid-stream
    NetworkError(String),
    /// The connect attempt did not complete within the timeout
    TimedOut,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientShutdown => write!(f, "closed by client"),
            Self::ServerClosed(Some(reason)) => write!(f, "closed by server: {reason}"),
            Self::ServerClosed(None) => write!(f, "closed by server"),
            Self::NetworkError(e) => write!(f, "network error: {e}"),
            Self::TimedOut => write!(f, "connect timed out"),
        }
    }
}

/// Transport state machine: `Disconnected → Connecting → Open → Closed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed(CloseReason),
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// `Open` or `Closed`: a connect attempt has finished one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Open | Self::Closed(_))
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Open => write!(f, "open"),
            Self::Closed(reason) => write!(f, "closed ({reason})"),
        }
    }
}

/// A chat message decoded from an inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: Sender,
    pub body: String,
}

/// Events delivered by the transport, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    StateChanged(ConnectionState),
    Message(IncomingMessage),
}
