//! Driving ports for purchase history use-cases.
//!
//! Inbound adapters call these instead of the repository so the
//! create-or-find reconciliation lives in one place.

use async_trait::async_trait;

use crate::domain::{CreateHistoryRequest, Error, History, HistoryChanges, HistoryId};

/// Mutating history use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryCommand: Send + Sync {
    /// Record a purchase, returning the existing row when the pair was
    /// already recorded.
    async fn create(&self, request: CreateHistoryRequest) -> Result<History, Error>;

    /// Apply a partial update after resolving any replacement references.
    async fn update(&self, id: HistoryId, changes: HistoryChanges) -> Result<History, Error>;

    /// Delete a history row.
    async fn delete(&self, id: HistoryId) -> Result<(), Error>;
}

/// Read-only history use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// List every history row.
    async fn list(&self) -> Result<Vec<History>, Error>;

    /// Fetch one history row.
    async fn get(&self, id: HistoryId) -> Result<History, Error>;
}
