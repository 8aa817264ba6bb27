//! Tickets API handlers.
//!
//! ```text
//! GET /api/tickets
//! GET /api/tickets/{id}
//! POST /api/tickets {"poi":{"id":1},"price":50.0,"transport_mode":"Avion"}
//! PUT /api/tickets/{id}
//! DELETE /api/tickets/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, PoiRef, Ticket, TicketDraft, TicketId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, require};

const RESOURCE: &str = "Ticket";
const POI: FieldName = FieldName::new("poi");
const PRICE: FieldName = FieldName::new("price");

fn ticket_not_found() -> Error {
    Error::not_found("Ticket not found")
}

/// Request body for creating or replacing a ticket.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TicketPayload {
    /// POI the ticket grants access to.
    pub poi: Option<PoiRef>,
    /// Non-negative price.
    #[schema(example = 50.0)]
    pub price: Option<f64>,
    /// How the traveller gets there.
    #[schema(example = "Avion")]
    pub transport_mode: Option<String>,
}

/// Validate the payload and confirm the referenced POI exists.
async fn resolve_draft(state: &HttpState, payload: TicketPayload) -> Result<TicketDraft, Error> {
    let poi = require(payload.poi, POI)?;
    let price = require(payload.price, PRICE)?;
    let draft = TicketDraft::new(poi.id, price, payload.transport_mode)
        .map_err(|err| invalid_field_error(PRICE, err.to_string()))?;
    state
        .pois
        .find_by_id(poi.id)
        .await
        .map_err(|err| err.into_domain("Poi"))?
        .ok_or_else(|| Error::not_found("Poi not found"))?;
    Ok(draft)
}

/// List every ticket.
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "Tickets", body = [Ticket]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listTickets"
)]
#[get("/tickets")]
pub async fn list_tickets(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Ticket>>> {
    let tickets = state
        .tickets
        .list()
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(tickets))
}

/// Fetch a ticket by id.
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket identifier")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "getTicket"
)]
#[get("/tickets/{id}")]
pub async fn get_ticket(
    state: web::Data<HttpState>,
    id: web::Path<TicketId>,
) -> ApiResult<web::Json<Ticket>> {
    let ticket = state
        .tickets
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(ticket_not_found)?;
    Ok(web::Json(ticket))
}

/// Create a ticket for an existing POI.
#[utoipa::path(
    post,
    path = "/api/tickets",
    request_body = TicketPayload,
    responses(
        (status = 200, description = "Created ticket", body = Ticket),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "POI not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "createTicket"
)]
#[post("/tickets")]
pub async fn create_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<TicketPayload>,
) -> ApiResult<web::Json<Ticket>> {
    let draft = resolve_draft(&state, payload.into_inner()).await?;
    let ticket = state
        .tickets
        .insert(&draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(ticket))
}

/// Replace a ticket's fields.
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket identifier")),
    request_body = TicketPayload,
    responses(
        (status = 200, description = "Updated ticket", body = Ticket),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Ticket or POI not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "updateTicket"
)]
#[put("/tickets/{id}")]
pub async fn update_ticket(
    state: web::Data<HttpState>,
    id: web::Path<TicketId>,
    payload: web::Json<TicketPayload>,
) -> ApiResult<web::Json<Ticket>> {
    let draft = resolve_draft(&state, payload.into_inner()).await?;
    let ticket = state
        .tickets
        .update(id.into_inner(), &draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(ticket_not_found)?;
    Ok(web::Json(ticket))
}

/// Delete a ticket that no purchase history references.
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Ticket still referenced by history", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "deleteTicket"
)]
#[delete("/tickets/{id}")]
pub async fn delete_ticket(
    state: web::Data<HttpState>,
    id: web::Path<TicketId>,
) -> ApiResult<HttpResponse> {
    let deleted = state
        .tickets
        .delete(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    if !deleted {
        return Err(ticket_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
