//! Port for saved search persistence.
use async_trait::async_trait;

use crate::domain::{Search, SearchDraft, SearchId};

use super::RepositoryError;

/// Storage for [`Search`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// List every search ordered by id.
    async fn list(&self) -> Result<Vec<Search>, RepositoryError>;

    /// Fetch a search by identifier.
    async fn find_by_id(&self, id: SearchId) -> Result<Option<Search>, RepositoryError>;

    /// Insert a search.
    async fn insert(&self, draft: &SearchDraft) -> Result<Search, RepositoryError>;

    /// Replace a search's fields; `None` when the id does not exist.
    async fn update(
        &self,
        id: SearchId,
        draft: &SearchDraft,
    ) -> Result<Option<Search>, RepositoryError>;

    /// Delete a search; `false` when the id does not exist.
    async fn delete(&self, id: SearchId) -> Result<bool, RepositoryError>;
}
