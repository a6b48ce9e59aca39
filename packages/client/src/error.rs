//! Fatal errors of the client binary.
//!
//! Connection and storage failures are not errors at this level: the
//! transport reports them as state and the identity store degrades to asking
//! again. What is left is setup that the terminal client cannot run without.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL '{0}': expected ws:// or wss://")]
    InvalidUrl(String),

    #[error("Terminal input failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Input task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
