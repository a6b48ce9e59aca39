//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("DisplayName cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// DisplayName uses a sender name reserved for system notices
    #[error("DisplayName '{0}' is reserved")]
    DisplayNameReserved(String),
}

/// Errors raised by identity storage backends
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage could not be read or written
    #[error("identity storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// Stored data could not be decoded or encoded
    #[error("identity storage corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}
