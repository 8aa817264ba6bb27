//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::RepositoryError;

/// Storage for [`User`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Insert a user and return it with its assigned id.
    async fn insert(&self, draft: &UserDraft) -> Result<User, RepositoryError>;

    /// Replace a user's fields; `None` when the id does not exist.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<Option<User>, RepositoryError>;

    /// Delete a user; `false` when the id does not exist.
    ///
    /// Fails with [`RepositoryError::ForeignKey`] while history rows still
    /// reference the user.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}
