//! Domain layer for the chat client.
//!
//! This module contains the message log, identity values and connection
//! model, independent of the WebSocket and storage details.

pub mod connection;
pub mod echo;
pub mod entity;
pub mod error;
pub mod grouping;
pub mod message_log;
pub mod name_pool;
pub mod repository;
pub mod transport;
pub mod value_object;

pub use connection::{CloseReason, ConnectionState, IncomingMessage, TransportEvent};
pub use echo::{EchoPolicy, EchoTracker};
pub use entity::{Message, Origin};
pub use error::{RepositoryError, ValueObjectError};
pub use grouping::{MessageGroup, group_by_sender, starts_group};
pub use message_log::MessageLog;
pub use name_pool::{NAME_POOL, pick_name};
pub use repository::IdentityRepository;
pub use transport::Transport;
pub use value_object::{DisplayName, MessageId, Sender, Timestamp};
