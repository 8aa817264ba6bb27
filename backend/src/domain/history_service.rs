//! Purchase history domain service.
//!
//! Creating a history is create-or-find: a purchase already recorded for the
//! same user and ticket is returned as-is. Two requests can both see no row
//! and race to insert; the loser's unique-constraint failure is reconciled by
//! re-reading the winner's row exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    HistoryCommand, HistoryQuery, HistoryRepository, RepositoryError, TicketRepository,
    UserRepository,
};
use crate::domain::{
    CreateHistoryRequest, Error, HISTORY_TICKET_REQUIRED, HISTORY_USER_REQUIRED, History,
    HistoryChanges, HistoryId, NewHistory, Ticket, TicketId, User, UserId,
};

/// Message returned when the post-conflict re-read finds nothing.
pub const HISTORY_RECONCILE_FAILED: &str =
    "Failed to create or find History after constraint violation";

const HISTORY_NOT_FOUND: &str = "History not found";

/// History service implementing the driving ports.
#[derive(Clone)]
pub struct HistoryService<H, U, T> {
    histories: Arc<H>,
    users: Arc<U>,
    tickets: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<H, U, T> HistoryService<H, U, T> {
    /// Create a new service with the given repositories and purchase clock.
    pub fn new(histories: Arc<H>, users: Arc<U>, tickets: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            histories,
            users,
            tickets,
            clock,
        }
    }
}

fn missing_reference(field: &'static str, message: &'static str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn map_history_error(error: RepositoryError) -> Error {
    error.into_domain("History")
}

impl<H, U, T> HistoryService<H, U, T>
where
    H: HistoryRepository,
    U: UserRepository,
    T: TicketRepository,
{
    async fn resolve_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("User"))?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    async fn resolve_ticket(&self, id: TicketId) -> Result<Ticket, Error> {
        self.tickets
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("Ticket"))?
            .ok_or_else(|| Error::not_found("Ticket not found"))
    }

    async fn find_pair(
        &self,
        user_id: UserId,
        ticket_id: TicketId,
    ) -> Result<Option<History>, Error> {
        self.histories
            .find_by_user_and_ticket(user_id, ticket_id)
            .await
            .map_err(map_history_error)
    }

    async fn reconcile_after_conflict(
        &self,
        user_id: UserId,
        ticket_id: TicketId,
    ) -> Result<History, Error> {
        self.find_pair(user_id, ticket_id)
            .await?
            .ok_or_else(|| Error::internal(HISTORY_RECONCILE_FAILED))
    }
}

#[async_trait]
impl<H, U, T> HistoryCommand for HistoryService<H, U, T>
where
    H: HistoryRepository,
    U: UserRepository,
    T: TicketRepository,
{
    async fn create(&self, request: CreateHistoryRequest) -> Result<History, Error> {
        let user_id = request
            .user_id
            .ok_or_else(|| missing_reference("userId", HISTORY_USER_REQUIRED))?;
        let ticket_id = request
            .ticket_id
            .ok_or_else(|| missing_reference("ticketId", HISTORY_TICKET_REQUIRED))?;

        self.resolve_user(user_id).await?;
        self.resolve_ticket(ticket_id).await?;

        if let Some(existing) = self.find_pair(user_id, ticket_id).await? {
            return Ok(existing);
        }

        let row = NewHistory {
            user_id,
            ticket_id,
            purchase_date: self.clock.utc(),
        };
        match self.histories.insert(&row).await {
            Ok(created) => Ok(created),
            Err(RepositoryError::UniqueViolation { .. }) => {
                self.reconcile_after_conflict(user_id, ticket_id).await
            }
            Err(err) => Err(map_history_error(err)),
        }
    }

    async fn update(&self, id: HistoryId, changes: HistoryChanges) -> Result<History, Error> {
        let current = self
            .histories
            .find_by_id(id)
            .await
            .map_err(map_history_error)?
            .ok_or_else(|| Error::not_found(HISTORY_NOT_FOUND))?;
        if changes.is_empty() {
            return Ok(current);
        }
        if let Some(user_id) = changes.user_id {
            self.resolve_user(user_id).await?;
        }
        if let Some(ticket_id) = changes.ticket_id {
            self.resolve_ticket(ticket_id).await?;
        }
        self.histories
            .update(id, &changes)
            .await
            .map_err(map_history_error)?
            .ok_or_else(|| Error::not_found(HISTORY_NOT_FOUND))
    }

    async fn delete(&self, id: HistoryId) -> Result<(), Error> {
        let deleted = self
            .histories
            .delete(id)
            .await
            .map_err(map_history_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(HISTORY_NOT_FOUND))
        }
    }
}

#[async_trait]
impl<H, U, T> HistoryQuery for HistoryService<H, U, T>
where
    H: HistoryRepository,
    U: UserRepository,
    T: TicketRepository,
{
    async fn list(&self) -> Result<Vec<History>, Error> {
        self.histories.list().await.map_err(map_history_error)
    }

    async fn get(&self, id: HistoryId) -> Result<History, Error> {
        self.histories
            .find_by_id(id)
            .await
            .map_err(map_history_error)?
            .ok_or_else(|| Error::not_found(HISTORY_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "history_service_tests.rs"]
mod tests;
