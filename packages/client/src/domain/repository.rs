//! Repository trait for the persisted display name.
//!
//! The domain layer defines the interface; infrastructure provides the
//! implementations (file, in-memory).

use async_trait::async_trait;

use super::error::RepositoryError;

/// Durable storage for the one display name of this device
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Read the stored name, `None` if nothing has been committed yet
    async fn load(&self) -> Result<Option<String>, RepositoryError>;

    /// Store `name`, replacing any previous value
    async fn save(&self, name: &str) -> Result<(), RepositoryError>;
}
