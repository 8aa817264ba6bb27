//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::Clock;
use serde_json::Value;

use crate::domain::{HistoryService, PoiService, TextGenerator};
use crate::inbound::http::api_scope;
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::test_support::{FixtureClock, InMemoryDatabase};

/// Wire every port to `db` through the real services.
///
/// The text generator starts without a model; chat tests swap `state.text`.
pub fn in_memory_state(db: &Arc<InMemoryDatabase>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::may_day());
    let history_service = Arc::new(HistoryService::new(
        db.clone(),
        db.clone(),
        db.clone(),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        users: db.clone(),
        pois: db.clone(),
        poi_command: Arc::new(PoiService::new(db.clone())),
        tickets: db.clone(),
        trips: db.clone(),
        searches: db.clone(),
        histories: history_service.clone(),
        histories_query: history_service,
        text: Arc::new(TextGenerator::uninitialised()),
    })
}

/// Application with the full `/api` scope and the error-mapping extractor
/// configuration used in production.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(api_scope())
}

/// Read the `code` and `message` of an error body.
pub fn error_parts(body: &Value) -> (&str, &str) {
    (
        body.get("code").and_then(Value::as_str).unwrap_or_default(),
        body.get("message").and_then(Value::as_str).unwrap_or_default(),
    )
}
