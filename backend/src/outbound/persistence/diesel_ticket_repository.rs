//! PostgreSQL-backed `TicketRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, TicketRepository};
use crate::domain::{PoiId, PoiRef, Ticket, TicketDraft, TicketId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{TicketRow, TicketValues};
use super::pool::DbPool;
use super::schema::tickets;

/// Diesel-backed implementation of the [`TicketRepository`] port.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn row_to_ticket(row: TicketRow) -> Ticket {
    Ticket {
        id: TicketId::new(row.id),
        poi: PoiRef {
            id: PoiId::new(row.poi_id),
        },
        price: row.price,
        transport_mode: row.transport_mode,
    }
}

fn values(draft: &TicketDraft) -> TicketValues<'_> {
    TicketValues {
        poi_id: draft.poi_id().get(),
        price: draft.price(),
        transport_mode: draft.transport_mode(),
    }
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TicketRow> = tickets::table
            .order(tickets::id.asc())
            .select(TicketRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_ticket).collect())
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TicketRow> = tickets::table
            .find(id.get())
            .select(TicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_ticket))
    }

    async fn insert(&self, draft: &TicketDraft) -> Result<Ticket, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: TicketRow = diesel::insert_into(tickets::table)
            .values(values(draft))
            .returning(TicketRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_ticket(row))
    }

    async fn update(
        &self,
        id: TicketId,
        draft: &TicketDraft,
    ) -> Result<Option<Ticket>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TicketRow> = diesel::update(tickets::table.find(id.get()))
            .set(values(draft))
            .returning(TicketRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_ticket))
    }

    async fn delete(&self, id: TicketId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(tickets::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
