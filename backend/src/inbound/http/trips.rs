//! Trips API handlers.
//!
//! ```text
//! GET /api/trips
//! GET /api/trips/{id}
//! POST /api/trips {"destination":"Lisbon","startDate":"2025-06-01","endDate":"2025-06-08"}
//! PUT /api/trips/{id}
//! DELETE /api/trips/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Trip, TripDraft, TripId, TripValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error};

const RESOURCE: &str = "Trip";

fn trip_not_found() -> Error {
    Error::not_found("Trip not found")
}

/// Request body for creating or replacing a trip. Every field is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    #[schema(example = "Lisbon")]
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub people: Option<i32>,
    pub transport: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<TripPayload> for TripDraft {
    type Error = Error;

    fn try_from(value: TripPayload) -> Result<Self, Self::Error> {
        let draft = TripDraft {
            destination: value.destination,
            start_date: value.start_date,
            end_date: value.end_date,
            budget: value.budget,
            people: value.people,
            transport: value.transport,
            latitude: value.latitude,
            longitude: value.longitude,
        };
        draft.validate().map_err(|err| {
            let field = match err {
                TripValidationError::EndBeforeStart => FieldName::new("endDate"),
                TripValidationError::LatitudeOutOfRange => FieldName::new("latitude"),
                TripValidationError::LongitudeOutOfRange => FieldName::new("longitude"),
            };
            invalid_field_error(field, err.to_string())
        })
    }
}

/// List every trip.
#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "Trips", body = [Trip]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "listTrips"
)]
#[get("/trips")]
pub async fn list_trips(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Trip>>> {
    let trips = state
        .trips
        .list()
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(trips))
}

/// Fetch a trip by id.
#[utoipa::path(
    get,
    path = "/api/trips/{id}",
    params(("id" = i64, Path, description = "Trip identifier")),
    responses(
        (status = 200, description = "Trip", body = Trip),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "getTrip"
)]
#[get("/trips/{id}")]
pub async fn get_trip(
    state: web::Data<HttpState>,
    id: web::Path<TripId>,
) -> ApiResult<web::Json<Trip>> {
    let trip = state
        .trips
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(trip_not_found)?;
    Ok(web::Json(trip))
}

/// Plan a trip.
#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = TripPayload,
    responses(
        (status = 200, description = "Created trip", body = Trip),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "createTrip"
)]
#[post("/trips")]
pub async fn create_trip(
    state: web::Data<HttpState>,
    payload: web::Json<TripPayload>,
) -> ApiResult<web::Json<Trip>> {
    let draft = TripDraft::try_from(payload.into_inner())?;
    let trip = state
        .trips
        .insert(&draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(trip))
}

/// Replace a trip's fields.
#[utoipa::path(
    put,
    path = "/api/trips/{id}",
    params(("id" = i64, Path, description = "Trip identifier")),
    request_body = TripPayload,
    responses(
        (status = 200, description = "Updated trip", body = Trip),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "updateTrip"
)]
#[put("/trips/{id}")]
pub async fn update_trip(
    state: web::Data<HttpState>,
    id: web::Path<TripId>,
    payload: web::Json<TripPayload>,
) -> ApiResult<web::Json<Trip>> {
    let draft = TripDraft::try_from(payload.into_inner())?;
    let trip = state
        .trips
        .update(id.into_inner(), &draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(trip_not_found)?;
    Ok(web::Json(trip))
}

/// Delete a trip.
#[utoipa::path(
    delete,
    path = "/api/trips/{id}",
    params(("id" = i64, Path, description = "Trip identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["trips"],
    operation_id = "deleteTrip"
)]
#[delete("/trips/{id}")]
pub async fn delete_trip(
    state: web::Data<HttpState>,
    id: web::Path<TripId>,
) -> ApiResult<HttpResponse> {
    let deleted = state
        .trips
        .delete(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    if !deleted {
        return Err(trip_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
