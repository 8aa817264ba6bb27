//! Points of interest API handlers.
//!
//! ```text
//! GET /api/pois
//! GET /api/pois/lookup?name=Eiffel%20Tower&location=Paris
//! GET /api/pois/{id}
//! POST /api/pois {"name":"Eiffel Tower","location":"Paris"}
//! PUT /api/pois/{id}
//! DELETE /api/pois/{id}
//! ```
//!
//! `POST` is create-or-find: posting a POI whose name and location already
//! exist (ignoring case) answers with the stored row.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Poi, PoiDraft, PoiId, PoiImageDraft, PoiLookupKey, PoiValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, decode_optional_base64, invalid_field_error, require,
};

const RESOURCE: &str = "Poi";
const NAME: FieldName = FieldName::new("name");
const EMBEDDING: FieldName = FieldName::new("embedding");

fn poi_not_found() -> Error {
    Error::not_found("Poi not found")
}

fn map_validation_error(err: PoiValidationError) -> Error {
    let field = match &err {
        PoiValidationError::EmptyName => NAME,
        PoiValidationError::TooLong { field, .. } => FieldName::new(*field),
    };
    invalid_field_error(field, err.to_string())
}

/// Image supplied with a POI.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PoiImagePayload {
    /// Public image location.
    pub image_url: Option<String>,
    /// Embedding bytes, base64 encoded.
    #[schema(format = Byte)]
    pub embedding: Option<String>,
}

/// Request body for creating or replacing a POI.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PoiPayload {
    /// Display name; required.
    #[schema(example = "Eiffel Tower")]
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Town or area.
    #[schema(example = "Paris")]
    pub location: Option<String>,
    /// Cover image location.
    pub image_url: Option<String>,
    /// Images owned by the POI; an update replaces the whole set.
    #[serde(default)]
    pub images: Vec<PoiImagePayload>,
}

impl TryFrom<PoiPayload> for PoiDraft {
    type Error = Error;

    fn try_from(value: PoiPayload) -> Result<Self, Self::Error> {
        let name = require(value.name, NAME)?;
        let images = value
            .images
            .into_iter()
            .map(|image| {
                Ok(PoiImageDraft {
                    image_url: image.image_url,
                    embedding: decode_optional_base64(image.embedding, EMBEDDING)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        PoiDraft::new(
            name,
            value.description,
            value.location,
            value.image_url,
            images,
        )
        .map_err(map_validation_error)
    }
}

/// Query string for the name and location lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PoiLookupQuery {
    /// POI name, matched case-insensitively.
    pub name: Option<String>,
    /// Location, matched case-insensitively; omitted or blank matches POIs
    /// without a location.
    pub location: Option<String>,
}

/// List every POI with its images.
#[utoipa::path(
    get,
    path = "/api/pois",
    responses(
        (status = 200, description = "Points of interest", body = [Poi]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "listPois"
)]
#[get("/pois")]
pub async fn list_pois(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Poi>>> {
    let pois = state
        .pois
        .list()
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(pois))
}

/// Find the POI with a given name and location.
#[utoipa::path(
    get,
    path = "/api/pois/lookup",
    params(PoiLookupQuery),
    responses(
        (status = 200, description = "Matching POI", body = Poi),
        (status = 400, description = "Name missing or blank", body = ErrorSchema),
        (status = 404, description = "No POI matches", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "lookupPoi"
)]
#[get("/pois/lookup")]
pub async fn lookup_poi(
    state: web::Data<HttpState>,
    query: web::Query<PoiLookupQuery>,
) -> ApiResult<web::Json<Poi>> {
    let PoiLookupQuery { name, location } = query.into_inner();
    let name = require(name, NAME)?;
    let key = PoiLookupKey::new(&name, location.as_deref()).map_err(map_validation_error)?;
    let poi = state
        .pois
        .find_by_name_and_location(&key)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(poi_not_found)?;
    Ok(web::Json(poi))
}

/// Fetch a POI by id.
#[utoipa::path(
    get,
    path = "/api/pois/{id}",
    params(("id" = i64, Path, description = "POI identifier")),
    responses(
        (status = 200, description = "Point of interest", body = Poi),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "getPoi"
)]
#[get("/pois/{id}")]
pub async fn get_poi(
    state: web::Data<HttpState>,
    id: web::Path<PoiId>,
) -> ApiResult<web::Json<Poi>> {
    let poi = state
        .pois
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(poi_not_found)?;
    Ok(web::Json(poi))
}

/// Create a POI, or return the existing one with the same name and location.
#[utoipa::path(
    post,
    path = "/api/pois",
    request_body = PoiPayload,
    responses(
        (status = 200, description = "Created or existing POI", body = Poi),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "createPoi"
)]
#[post("/pois")]
pub async fn create_poi(
    state: web::Data<HttpState>,
    payload: web::Json<PoiPayload>,
) -> ApiResult<web::Json<Poi>> {
    let draft = PoiDraft::try_from(payload.into_inner())?;
    let poi = state.poi_command.create(draft).await?;
    Ok(web::Json(poi))
}

/// Replace a POI's fields and images.
#[utoipa::path(
    put,
    path = "/api/pois/{id}",
    params(("id" = i64, Path, description = "POI identifier")),
    request_body = PoiPayload,
    responses(
        (status = 200, description = "Updated POI", body = Poi),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name and location taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "updatePoi"
)]
#[put("/pois/{id}")]
pub async fn update_poi(
    state: web::Data<HttpState>,
    id: web::Path<PoiId>,
    payload: web::Json<PoiPayload>,
) -> ApiResult<web::Json<Poi>> {
    let draft = PoiDraft::try_from(payload.into_inner())?;
    let poi = state
        .pois
        .update(id.into_inner(), &draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(poi_not_found)?;
    Ok(web::Json(poi))
}

/// Delete a POI and its images.
#[utoipa::path(
    delete,
    path = "/api/pois/{id}",
    params(("id" = i64, Path, description = "POI identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "POI still referenced by tickets", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pois"],
    operation_id = "deletePoi"
)]
#[delete("/pois/{id}")]
pub async fn delete_poi(
    state: web::Data<HttpState>,
    id: web::Path<PoiId>,
) -> ApiResult<HttpResponse> {
    let deleted = state
        .pois
        .delete(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    if !deleted {
        return Err(poi_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
