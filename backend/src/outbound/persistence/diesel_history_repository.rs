//! PostgreSQL-backed `HistoryRepository` implementation using Diesel ORM.
//!
//! Rows are read joined to their user and ticket. The
//! `histories_user_id_ticket_id_key` constraint is reported as
//! [`RepositoryError::UniqueViolation`]; reconciliation belongs to the caller.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{HistoryRepository, RepositoryError};
use crate::domain::{History, HistoryChanges, HistoryId, NewHistory, TicketId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_ticket_repository::row_to_ticket;
use super::diesel_user_repository::row_to_user;
use super::models::{HistoryRow, HistoryUpdate, NewHistoryRow, TicketRow, UserRow};
use super::pool::DbPool;
use super::schema::{histories, tickets, users};

type JoinedRow = (HistoryRow, UserRow, TicketRow);

/// Diesel-backed implementation of the [`HistoryRepository`] port.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn joined_to_history((history, user, ticket): JoinedRow) -> Result<History, RepositoryError> {
    Ok(History {
        id: HistoryId::new(history.id),
        user: row_to_user(user)?,
        ticket: row_to_ticket(ticket),
        purchase_date: history.purchase_date,
    })
}

async fn load_by_id(conn: &mut AsyncPgConnection, id: i64) -> QueryResult<Option<JoinedRow>> {
    histories::table
        .inner_join(users::table)
        .inner_join(tickets::table)
        .filter(histories::id.eq(id))
        .select((
            HistoryRow::as_select(),
            UserRow::as_select(),
            TicketRow::as_select(),
        ))
        .first(conn)
        .await
        .optional()
}

async fn load_hydrated(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<History>, RepositoryError> {
    load_by_id(conn, id)
        .await
        .map_err(map_diesel_error)?
        .map(joined_to_history)
        .transpose()
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn list(&self) -> Result<Vec<History>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JoinedRow> = histories::table
            .inner_join(users::table)
            .inner_join(tickets::table)
            .order(histories::id.asc())
            .select((
                HistoryRow::as_select(),
                UserRow::as_select(),
                TicketRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(joined_to_history).collect()
    }

    async fn find_by_id(&self, id: HistoryId) -> Result<Option<History>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_hydrated(&mut conn, id.get()).await
    }

    async fn find_by_user_and_ticket(
        &self,
        user_id: UserId,
        ticket_id: TicketId,
    ) -> Result<Option<History>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<JoinedRow> = histories::table
            .inner_join(users::table)
            .inner_join(tickets::table)
            .filter(histories::user_id.eq(user_id.get()))
            .filter(histories::ticket_id.eq(ticket_id.get()))
            .select((
                HistoryRow::as_select(),
                UserRow::as_select(),
                TicketRow::as_select(),
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(joined_to_history).transpose()
    }

    async fn insert(&self, history: &NewHistory) -> Result<History, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewHistoryRow {
            user_id: history.user_id.get(),
            ticket_id: history.ticket_id.get(),
            purchase_date: history.purchase_date,
        };
        let id: i64 = diesel::insert_into(histories::table)
            .values(&row)
            .returning(histories::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        load_hydrated(&mut conn, id)
            .await?
            .ok_or_else(|| RepositoryError::query("inserted history row vanished"))
    }

    async fn update(
        &self,
        id: HistoryId,
        changes: &HistoryChanges,
    ) -> Result<Option<History>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if changes.is_empty() {
            return load_hydrated(&mut conn, id.get()).await;
        }

        let update = HistoryUpdate {
            user_id: changes.user_id.map(UserId::get),
            ticket_id: changes.ticket_id.map(TicketId::get),
            purchase_date: changes.purchase_date,
        };
        let updated = diesel::update(histories::table.find(id.get()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Ok(None);
        }

        load_hydrated(&mut conn, id.get()).await
    }

    async fn delete(&self, id: HistoryId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(histories::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
