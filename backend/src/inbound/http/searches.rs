//! Saved search API handlers.
//!
//! ```text
//! GET /api/searches
//! GET /api/searches/{id}
//! POST /api/searches {"destination":"Paris","budget":1000.0,"persons":2}
//! PUT /api/searches/{id}
//! DELETE /api/searches/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Search, SearchDraft, SearchId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const RESOURCE: &str = "Search";

fn search_not_found() -> Error {
    Error::not_found("Search not found")
}

/// Request body for creating or replacing a saved search.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchPayload {
    #[schema(example = "Paris")]
    pub destination: Option<String>,
    pub budget: Option<f64>,
    pub persons: Option<i32>,
    pub transport_mode: Option<String>,
}

impl From<SearchPayload> for SearchDraft {
    fn from(value: SearchPayload) -> Self {
        Self {
            destination: value.destination,
            budget: value.budget,
            persons: value.persons,
            transport_mode: value.transport_mode,
        }
    }
}

/// List saved searches.
#[utoipa::path(
    get,
    path = "/api/searches",
    responses(
        (status = 200, description = "Searches", body = [Search]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["searches"],
    operation_id = "listSearches"
)]
#[get("/searches")]
pub async fn list_searches(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Search>>> {
    let searches = state
        .searches
        .list()
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(searches))
}

/// Fetch a saved search by id.
#[utoipa::path(
    get,
    path = "/api/searches/{id}",
    params(("id" = i64, Path, description = "Search identifier")),
    responses(
        (status = 200, description = "Search", body = Search),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["searches"],
    operation_id = "getSearch"
)]
#[get("/searches/{id}")]
pub async fn get_search(
    state: web::Data<HttpState>,
    id: web::Path<SearchId>,
) -> ApiResult<web::Json<Search>> {
    let search = state
        .searches
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(search_not_found)?;
    Ok(web::Json(search))
}

/// Save a search.
#[utoipa::path(
    post,
    path = "/api/searches",
    request_body = SearchPayload,
    responses(
        (status = 200, description = "Saved search", body = Search),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["searches"],
    operation_id = "createSearch"
)]
#[post("/searches")]
pub async fn create_search(
    state: web::Data<HttpState>,
    payload: web::Json<SearchPayload>,
) -> ApiResult<web::Json<Search>> {
    let draft = SearchDraft::from(payload.into_inner());
    let search = state
        .searches
        .insert(&draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(search))
}

/// Replace a saved search.
#[utoipa::path(
    put,
    path = "/api/searches/{id}",
    params(("id" = i64, Path, description = "Search identifier")),
    request_body = SearchPayload,
    responses(
        (status = 200, description = "Updated search", body = Search),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["searches"],
    operation_id = "updateSearch"
)]
#[put("/searches/{id}")]
pub async fn update_search(
    state: web::Data<HttpState>,
    id: web::Path<SearchId>,
    payload: web::Json<SearchPayload>,
) -> ApiResult<web::Json<Search>> {
    let draft = SearchDraft::from(payload.into_inner());
    let search = state
        .searches
        .update(id.into_inner(), &draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(search_not_found)?;
    Ok(web::Json(search))
}

/// Delete a saved search.
#[utoipa::path(
    delete,
    path = "/api/searches/{id}",
    params(("id" = i64, Path, description = "Search identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["searches"],
    operation_id = "deleteSearch"
)]
#[delete("/searches/{id}")]
pub async fn delete_search(
    state: web::Data<HttpState>,
    id: web::Path<SearchId>,
) -> ApiResult<HttpResponse> {
    let deleted = state
        .searches
        .delete(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    if !deleted {
        return Err(search_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
