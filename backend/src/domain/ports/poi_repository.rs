//! Port for point-of-interest persistence.
//!
//! Besides plain CRUD, adapters answer the case-insensitive name and location
//! lookup that backs POI de-duplication. Implementations must compare
//! `lower(name)` and `lower(coalesce(location, ''))` against the normalised
//! [`PoiLookupKey`], the same expression the unique index is built on.

use async_trait::async_trait;

use crate::domain::{Poi, PoiDraft, PoiId, PoiLookupKey};

use super::RepositoryError;

/// Storage for [`Poi`] rows and their owned images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiRepository: Send + Sync {
    /// List every POI with its images, ordered by id.
    async fn list(&self) -> Result<Vec<Poi>, RepositoryError>;

    /// Fetch a POI with its images.
    async fn find_by_id(&self, id: PoiId) -> Result<Option<Poi>, RepositoryError>;

    /// Find the POI matching a normalised name and location.
    ///
    /// Returns `Ok(None)` when nothing matches; a miss is not an error.
    async fn find_by_name_and_location(
        &self,
        key: &PoiLookupKey,
    ) -> Result<Option<Poi>, RepositoryError>;

    /// Insert a POI and its images.
    ///
    /// Fails with [`RepositoryError::UniqueViolation`] when another POI
    /// already holds the same lookup key.
    async fn insert(&self, draft: &PoiDraft) -> Result<Poi, RepositoryError>;

    /// Replace a POI's fields and images; `None` when the id does not exist.
    async fn update(&self, id: PoiId, draft: &PoiDraft) -> Result<Option<Poi>, RepositoryError>;

    /// Delete a POI and cascade to its images; `false` when absent.
    async fn delete(&self, id: PoiId) -> Result<bool, RepositoryError>;
}
