//! Reference broadcast server for Tsudoi.
//!
//! Every frame a client sends is broadcast to all connected clients, the
//! sender included. Join and leave notices are sent as `System` frames.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use config::ServerArgs;
pub use error::ServerError;
pub use ui::{create_app, run, serve};
