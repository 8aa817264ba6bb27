//! Purchase history records.
//!
//! A history row records that one user bought one ticket. The store allows at
//! most one row per `(user, ticket)` pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{HistoryId, Ticket, TicketId, User, UserId};

/// Message returned when the create payload is absent.
pub const EMPTY_HISTORY_PAYLOAD: &str = "Empty history payload";
/// Message returned when the create payload lacks a user id.
pub const HISTORY_USER_REQUIRED: &str = "History must reference an existing user by id";
/// Message returned when the create payload lacks a ticket id.
pub const HISTORY_TICKET_REQUIRED: &str = "History must reference an existing ticket by id";

/// Purchase event linking a user to a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct History {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 12)]
    pub id: HistoryId,
    /// Buyer.
    pub user: User,
    /// Purchased ticket.
    pub ticket: Ticket,
    /// When the purchase was recorded.
    pub purchase_date: DateTime<Utc>,
}

/// Row to insert for a new purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewHistory {
    /// Buyer.
    pub user_id: UserId,
    /// Purchased ticket.
    pub ticket_id: TicketId,
    /// Server-assigned purchase time.
    pub purchase_date: DateTime<Utc>,
}

/// Unvalidated create request; either reference may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreateHistoryRequest {
    /// Buyer reference.
    pub user_id: Option<UserId>,
    /// Ticket reference.
    pub ticket_id: Option<TicketId>,
}

/// Partial update applied to an existing history row.
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryChanges {
    /// Replacement buyer.
    pub user_id: Option<UserId>,
    /// Replacement ticket.
    pub ticket_id: Option<TicketId>,
    /// Replacement purchase time.
    pub purchase_date: Option<DateTime<Utc>>,
}

impl HistoryChanges {
    /// Report whether the update leaves the row untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.ticket_id.is_none() && self.purchase_date.is_none()
    }
}
