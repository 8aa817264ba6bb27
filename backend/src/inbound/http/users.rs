//! Users API handlers.
//!
//! ```text
//! GET /api/users
//! GET /api/users/{id}
//! POST /api/users {"pseudo":"wanderer"}
//! PUT /api/users/{id} {"pseudo":"explorer"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Error, Pseudo, User, UserDraft, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, require};

const RESOURCE: &str = "User";
const PSEUDO: FieldName = FieldName::new("pseudo");

fn user_not_found() -> Error {
    Error::not_found("User not found")
}

/// Request body for creating or replacing a user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Display name; trimmed before storage.
    #[schema(example = "wanderer")]
    pub pseudo: Option<String>,
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = Error;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        let raw = require(value.pseudo, PSEUDO)?;
        let pseudo = Pseudo::new(raw).map_err(|err| invalid_field_error(PSEUDO, err.to_string()))?;
        Ok(Self { pseudo })
    }
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state
        .users
        .list()
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(users))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<UserId>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .find_by_id(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(user_not_found)?;
    Ok(web::Json(user))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "Created user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state
        .users
        .insert(&draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    Ok(web::Json(user))
}

/// Replace a user's pseudo.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<UserId>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state
        .users
        .update(id.into_inner(), &draft)
        .await
        .map_err(|err| err.into_domain(RESOURCE))?
        .ok_or_else(user_not_found)?;
    Ok(web::Json(user))
}

/// Delete a user that no purchase history references.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "User still referenced by history", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<UserId>,
) -> ApiResult<HttpResponse> {
    let deleted = state
        .users
        .delete(id.into_inner())
        .await
        .map_err(|err| err.into_domain(RESOURCE))?;
    if !deleted {
        return Err(user_not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
