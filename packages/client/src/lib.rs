//! Tsudoi chat client.
//!
//! The core is the message delivery channel: identity persistence, the
//! WebSocket transport with reconnects, and the ordered message log. The
//! terminal adapter in [`ui`] is a thin consumer of [`usecase::ChatSession`].

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use config::{ClientArgs, ClientConfig};
pub use error::ClientError;
pub use ui::run_client;
