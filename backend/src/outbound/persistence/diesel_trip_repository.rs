//! PostgreSQL-backed `TripRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, TripRepository};
use crate::domain::{Trip, TripDraft, TripId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{TripRow, TripValues};
use super::pool::DbPool;
use super::schema::trips;

/// Diesel-backed implementation of the [`TripRepository`] port.
#[derive(Clone)]
pub struct DieselTripRepository {
    pool: DbPool,
}

impl DieselTripRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_trip(row: TripRow) -> Trip {
    Trip {
        id: TripId::new(row.id),
        destination: row.destination,
        start_date: row.start_date,
        end_date: row.end_date,
        budget: row.budget,
        people: row.people,
        transport: row.transport,
        latitude: row.latitude,
        longitude: row.longitude,
    }
}

fn values(draft: &TripDraft) -> TripValues<'_> {
    TripValues {
        destination: draft.destination.as_deref(),
        start_date: draft.start_date,
        end_date: draft.end_date,
        budget: draft.budget,
        people: draft.people,
        transport: draft.transport.as_deref(),
        latitude: draft.latitude,
        longitude: draft.longitude,
    }
}

#[async_trait]
impl TripRepository for DieselTripRepository {
    async fn list(&self) -> Result<Vec<Trip>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TripRow> = trips::table
            .order(trips::id.asc())
            .select(TripRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_trip).collect())
    }

    async fn find_by_id(&self, id: TripId) -> Result<Option<Trip>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TripRow> = trips::table
            .find(id.get())
            .select(TripRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_trip))
    }

    async fn insert(&self, draft: &TripDraft) -> Result<Trip, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TripRow = diesel::insert_into(trips::table)
            .values(values(draft))
            .returning(TripRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_trip(row))
    }

    async fn update(
        &self,
        id: TripId,
        draft: &TripDraft,
    ) -> Result<Option<Trip>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TripRow> = diesel::update(trips::table.find(id.get()))
            .set(values(draft))
            .returning(TripRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_trip))
    }

    async fn delete(&self, id: TripId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(trips::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
