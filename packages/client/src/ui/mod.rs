//! Terminal presentation of a chat session.

pub mod cli;
pub mod render;

pub use cli::run_client;
