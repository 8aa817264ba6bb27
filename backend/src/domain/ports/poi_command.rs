//! Driving port for POI creation.
use async_trait::async_trait;

use crate::domain::{Error, Poi, PoiDraft};

/// Create-or-find entry point for POIs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiCommand: Send + Sync {
    /// Return the POI sharing the draft's name and location, creating it
    /// when none exists.
    async fn create(&self, draft: PoiDraft) -> Result<Poi, Error>;
}
