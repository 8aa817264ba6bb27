//! Port for trip persistence.
use async_trait::async_trait;

use crate::domain::{Trip, TripDraft, TripId};

use super::RepositoryError;

/// Storage for [`Trip`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// List every trip ordered by id.
    async fn list(&self) -> Result<Vec<Trip>, RepositoryError>;

    /// Fetch a trip by identifier.
    async fn find_by_id(&self, id: TripId) -> Result<Option<Trip>, RepositoryError>;

    /// Insert a trip.
    async fn insert(&self, draft: &TripDraft) -> Result<Trip, RepositoryError>;

    /// Replace a trip's fields; `None` when the id does not exist.
    async fn update(&self, id: TripId, draft: &TripDraft) -> Result<Option<Trip>, RepositoryError>;

    /// Delete a trip; `false` when the id does not exist.
    async fn delete(&self, id: TripId) -> Result<bool, RepositoryError>;
}
