//! Actix response mapping for [`Error`] and extractor error handlers.
//!
//! Status codes follow [`ErrorCode`]. Internal failures are logged in full
//! and answered with [`Error::redacted`]; dependency outages are logged at
//! warn.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = self.trace_id().unwrap_or("-");
        match self.code() {
            ErrorCode::InternalError => {
                error!(trace_id, details = ?self.details(), "{}", self.message());
            }
            ErrorCode::ServiceUnavailable => {
                warn!(trace_id, "{}", self.message());
            }
            _ => {}
        }

        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(self.redacted())
    }
}

fn rejected(kind: &str, err: impl std::fmt::Display) -> actix_web::Error {
    Error::invalid_request(format!("Invalid {kind}: {err}")).into()
}

/// JSON body configuration: malformed bodies become `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _: &HttpRequest| rejected("JSON payload", err))
}

/// Path configuration: non-numeric ids become `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _: &HttpRequest| rejected("path parameter", err))
}

/// Query string configuration: undecodable parameters become `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _: &HttpRequest| rejected("query string", err))
}
