//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every resource handler under `/api`, the health
//! probes and the error body ([`ErrorSchema`]). Entity schemas are collected
//! from the handlers' request and response bodies.
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::ErrorCode;
use crate::inbound::http::schemas::ErrorSchema;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel backend API",
        description = "Travel records CRUD plus prompt completion by a local language model."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::pois::list_pois,
        crate::inbound::http::pois::lookup_poi,
        crate::inbound::http::pois::get_poi,
        crate::inbound::http::pois::create_poi,
        crate::inbound::http::pois::update_poi,
        crate::inbound::http::pois::delete_poi,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::create_ticket,
        crate::inbound::http::tickets::update_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::trips::list_trips,
        crate::inbound::http::trips::get_trip,
        crate::inbound::http::trips::create_trip,
        crate::inbound::http::trips::update_trip,
        crate::inbound::http::trips::delete_trip,
        crate::inbound::http::searches::list_searches,
        crate::inbound::http::searches::get_search,
        crate::inbound::http::searches::create_search,
        crate::inbound::http::searches::update_search,
        crate::inbound::http::searches::delete_search,
        crate::inbound::http::histories::list_histories,
        crate::inbound::http::histories::get_history,
        crate::inbound::http::histories::create_history,
        crate::inbound::http::histories::update_history,
        crate::inbound::http::histories::delete_history,
        crate::inbound::http::chat::chat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCode)),
    tags(
        (name = "users", description = "Registered travellers"),
        (name = "pois", description = "Points of interest and their images"),
        (name = "tickets", description = "Tickets for points of interest"),
        (name = "trips", description = "Planned trips"),
        (name = "searches", description = "Saved searches"),
        (name = "histories", description = "Purchase history"),
        (name = "chat", description = "Prompt completion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
