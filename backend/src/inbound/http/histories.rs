//! Purchase history API handlers.
//!
//! ```text
//! GET /api/histories
//! GET /api/histories/{id}
//! POST /api/histories {"userId":7,"ticketId":3}
//! PUT /api/histories/{id} {"purchase_date":"2025-05-01T09:30:00Z"}
//! DELETE /api/histories/{id}
//! ```
//!
//! Creation is idempotent per `(userId, ticketId)`: repeating the request
//! returns the row recorded the first time.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    CreateHistoryRequest, EMPTY_HISTORY_PAYLOAD, Error, History, HistoryChanges, HistoryId,
    TicketId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_rfc3339_timestamp};

/// Request body for recording a purchase.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryPayload {
    /// Buyer.
    #[schema(value_type = Option<i64>, example = 7)]
    pub user_id: Option<UserId>,
    /// Purchased ticket.
    #[schema(value_type = Option<i64>, example = 3)]
    pub ticket_id: Option<TicketId>,
}

impl From<CreateHistoryPayload> for CreateHistoryRequest {
    fn from(value: CreateHistoryPayload) -> Self {
        Self {
            user_id: value.user_id,
            ticket_id: value.ticket_id,
        }
    }
}

/// Partial update of a purchase; absent fields are kept.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryPayload {
    /// Replacement buyer.
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    /// Replacement ticket.
    #[schema(value_type = Option<i64>)]
    pub ticket_id: Option<TicketId>,
    /// Replacement purchase time, RFC 3339.
    #[serde(rename = "purchase_date", alias = "purchaseDate")]
    #[schema(example = "2025-05-01T09:30:00Z")]
    pub purchase_date: Option<String>,
}

impl TryFrom<UpdateHistoryPayload> for HistoryChanges {
    type Error = Error;

    fn try_from(value: UpdateHistoryPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: value.user_id,
            ticket_id: value.ticket_id,
            purchase_date: parse_optional_rfc3339_timestamp(
                value.purchase_date,
                FieldName::new("purchase_date"),
            )?,
        })
    }
}

/// Parse the create body, treating an empty body and JSON `null` alike.
fn parse_create_payload(body: &[u8]) -> Result<CreateHistoryPayload, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::invalid_request(EMPTY_HISTORY_PAYLOAD));
    }
    let payload: Option<CreateHistoryPayload> = serde_json::from_slice(body)
        .map_err(|err| Error::invalid_request(format!("Invalid JSON payload: {err}")))?;
    payload.ok_or_else(|| Error::invalid_request(EMPTY_HISTORY_PAYLOAD))
}

/// List every purchase with its user and ticket.
#[utoipa::path(
    get,
    path = "/api/histories",
    responses(
        (status = 200, description = "Purchase history", body = [History]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["histories"],
    operation_id = "listHistories"
)]
#[get("/histories")]
pub async fn list_histories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<History>>> {
    Ok(web::Json(state.histories_query.list().await?))
}

/// Fetch a purchase by id.
#[utoipa::path(
    get,
    path = "/api/histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    responses(
        (status = 200, description = "Purchase", body = History),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["histories"],
    operation_id = "getHistory"
)]
#[get("/histories/{id}")]
pub async fn get_history(
    state: web::Data<HttpState>,
    id: web::Path<HistoryId>,
) -> ApiResult<web::Json<History>> {
    Ok(web::Json(state.histories_query.get(id.into_inner()).await?))
}

/// Record a purchase, or return the one already recorded for the pair.
#[utoipa::path(
    post,
    path = "/api/histories",
    request_body = CreateHistoryPayload,
    responses(
        (status = 200, description = "Created or existing purchase", body = History),
        (status = 400, description = "Payload, userId or ticketId missing", body = ErrorSchema),
        (status = 404, description = "User or ticket not found", body = ErrorSchema),
        (status = 500, description = "Purchase could not be created or found", body = ErrorSchema)
    ),
    tags = ["histories"],
    operation_id = "createHistory"
)]
#[post("/histories")]
pub async fn create_history(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<History>> {
    let payload = parse_create_payload(&body)?;
    let history = state.histories.create(payload.into()).await?;
    Ok(web::Json(history))
}

/// Change a purchase's user, ticket or date.
#[utoipa::path(
    put,
    path = "/api/histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    request_body = UpdateHistoryPayload,
    responses(
        (status = 200, description = "Updated purchase", body = History),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "History, user or ticket not found", body = ErrorSchema),
        (status = 409, description = "Pair already recorded", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["histories"],
    operation_id = "updateHistory"
)]
#[put("/histories/{id}")]
pub async fn update_history(
    state: web::Data<HttpState>,
    id: web::Path<HistoryId>,
    payload: web::Json<UpdateHistoryPayload>,
) -> ApiResult<web::Json<History>> {
    let changes = HistoryChanges::try_from(payload.into_inner())?;
    let history = state.histories.update(id.into_inner(), changes).await?;
    Ok(web::Json(history))
}

/// Delete a purchase.
#[utoipa::path(
    delete,
    path = "/api/histories/{id}",
    params(("id" = i64, Path, description = "History identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["histories"],
    operation_id = "deleteHistory"
)]
#[delete("/histories/{id}")]
pub async fn delete_history(
    state: web::Data<HttpState>,
    id: web::Path<HistoryId>,
) -> ApiResult<HttpResponse> {
    state.histories.delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
