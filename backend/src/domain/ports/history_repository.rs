//! Port for purchase history persistence.
//!
//! The store enforces one row per `(user_id, ticket_id)`. Adapters report a
//! collision on that constraint as [`RepositoryError::UniqueViolation`] and
//! leave reconciliation to the caller.

use async_trait::async_trait;

use crate::domain::{History, HistoryChanges, HistoryId, NewHistory, TicketId, UserId};

use super::RepositoryError;

/// Storage for [`History`] rows, hydrated with their user and ticket.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// List every history row ordered by id.
    async fn list(&self) -> Result<Vec<History>, RepositoryError>;

    /// Fetch a history row by identifier.
    async fn find_by_id(&self, id: HistoryId) -> Result<Option<History>, RepositoryError>;

    /// Fetch the row recording that `user_id` bought `ticket_id`.
    async fn find_by_user_and_ticket(
        &self,
        user_id: UserId,
        ticket_id: TicketId,
    ) -> Result<Option<History>, RepositoryError>;

    /// Insert a purchase.
    ///
    /// Fails with [`RepositoryError::UniqueViolation`] when a concurrent
    /// writer already recorded the same pair.
    async fn insert(&self, history: &NewHistory) -> Result<History, RepositoryError>;

    /// Apply a partial update; `None` when the id does not exist.
    async fn update(
        &self,
        id: HistoryId,
        changes: &HistoryChanges,
    ) -> Result<Option<History>, RepositoryError>;

    /// Delete a history row; `false` when the id does not exist.
    async fn delete(&self, id: HistoryId) -> Result<bool, RepositoryError>;
}
