//! Port for ticket persistence.
use async_trait::async_trait;

use crate::domain::{Ticket, TicketDraft, TicketId};

use super::RepositoryError;

/// Storage for [`Ticket`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// List every ticket ordered by id.
    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError>;

    /// Fetch a ticket by identifier.
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError>;

    /// Insert a ticket; fails with [`RepositoryError::ForeignKey`] when the
    /// POI vanished concurrently.
    async fn insert(&self, draft: &TicketDraft) -> Result<Ticket, RepositoryError>;

    /// Replace a ticket's fields; `None` when the id does not exist.
    async fn update(
        &self,
        id: TicketId,
        draft: &TicketDraft,
    ) -> Result<Option<Ticket>, RepositoryError>;

    /// Delete a ticket; `false` when the id does not exist.
    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError>;
}
