//! OpenAPI schema for the error body.
//!
//! [`crate::domain::Error`] serialises through a private body type with
//! validation on the way in, so its schema is declared here by hand.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// Error body returned with every 4xx and 5xx response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Failure category.
    code: ErrorCode,
    /// Client-facing message; internal failures read `Internal server error`.
    #[schema(example = "Ticket not found")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(format = Uuid)]
    trace_id: Option<String>,
    /// Offending field and validation code for `invalid_request`.
    #[schema(example = json!({ "field": "price", "code": "missing_field" }))]
    details: Option<serde_json::Value>,
}
