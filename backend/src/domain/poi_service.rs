//! POI create-or-find service.
//!
//! POIs are unique by case-insensitive name and location. Creation returns the
//! stored POI when one already matches, and reconciles an insert race the same
//! way history creation does: one re-read after the unique constraint fires.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PoiCommand, PoiRepository, RepositoryError};
use crate::domain::{Error, Poi, PoiDraft, PoiLookupKey};

/// Message returned when the post-conflict re-read finds nothing.
pub const POI_RECONCILE_FAILED: &str = "Failed to create or find Poi after constraint violation";

/// POI service implementing [`PoiCommand`].
#[derive(Clone)]
pub struct PoiService<P> {
    pois: Arc<P>,
}

impl<P> PoiService<P> {
    /// Create a new service over the given repository.
    pub fn new(pois: Arc<P>) -> Self {
        Self { pois }
    }
}

fn map_poi_error(error: RepositoryError) -> Error {
    error.into_domain("Poi")
}

impl<P: PoiRepository> PoiService<P> {
    async fn find(&self, key: &PoiLookupKey) -> Result<Option<Poi>, Error> {
        self.pois
            .find_by_name_and_location(key)
            .await
            .map_err(map_poi_error)
    }
}

#[async_trait]
impl<P: PoiRepository> PoiCommand for PoiService<P> {
    async fn create(&self, draft: PoiDraft) -> Result<Poi, Error> {
        let key = draft.lookup_key();
        if let Some(existing) = self.find(&key).await? {
            return Ok(existing);
        }
        match self.pois.insert(&draft).await {
            Ok(created) => Ok(created),
            Err(RepositoryError::UniqueViolation { .. }) => self
                .find(&key)
                .await?
                .ok_or_else(|| Error::internal(POI_RECONCILE_FAILED)),
            Err(err) => Err(map_poi_error(err)),
        }
    }
}
