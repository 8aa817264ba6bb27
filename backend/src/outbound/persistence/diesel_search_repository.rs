//! PostgreSQL-backed `SearchRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, SearchRepository};
use crate::domain::{Search, SearchDraft, SearchId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{SearchRow, SearchValues};
use super::pool::DbPool;
use super::schema::searches;

/// Diesel-backed implementation of the [`SearchRepository`] port.
#[derive(Clone)]
pub struct DieselSearchRepository {
    pool: DbPool,
}

impl DieselSearchRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_search(row: SearchRow) -> Search {
    Search {
        id: SearchId::new(row.id),
        destination: row.destination,
        budget: row.budget,
        persons: row.persons,
        transport_mode: row.transport_mode,
    }
}

fn values(draft: &SearchDraft) -> SearchValues<'_> {
    SearchValues {
        destination: draft.destination.as_deref(),
        budget: draft.budget,
        persons: draft.persons,
        transport_mode: draft.transport_mode.as_deref(),
    }
}

#[async_trait]
impl SearchRepository for DieselSearchRepository {
    async fn list(&self) -> Result<Vec<Search>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SearchRow> = searches::table
            .order(searches::id.asc())
            .select(SearchRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_search).collect())
    }

    async fn find_by_id(&self, id: SearchId) -> Result<Option<Search>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SearchRow> = searches::table
            .find(id.get())
            .select(SearchRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_search))
    }

    async fn insert(&self, draft: &SearchDraft) -> Result<Search, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: SearchRow = diesel::insert_into(searches::table)
            .values(values(draft))
            .returning(SearchRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_search(row))
    }

    async fn update(
        &self,
        id: SearchId,
        draft: &SearchDraft,
    ) -> Result<Option<Search>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SearchRow> = diesel::update(searches::table.find(id.get()))
            .set(values(draft))
            .returning(SearchRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_search))
    }

    async fn delete(&self, id: SearchId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(searches::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
