//! HTTP inbound adapter exposing REST endpoints.

pub mod chat;
pub mod error;
pub mod health;
pub mod histories;
pub mod pois;
pub mod schemas;
pub mod searches;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
pub mod trips;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Every resource route under `/api`.
///
/// `/pois/lookup` is registered ahead of `/pois/{id}` so the literal segment
/// wins.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(pois::list_pois)
        .service(pois::lookup_poi)
        .service(pois::get_poi)
        .service(pois::create_poi)
        .service(pois::update_poi)
        .service(pois::delete_poi)
        .service(tickets::list_tickets)
        .service(tickets::get_ticket)
        .service(tickets::create_ticket)
        .service(tickets::update_ticket)
        .service(tickets::delete_ticket)
        .service(trips::list_trips)
        .service(trips::get_trip)
        .service(trips::create_trip)
        .service(trips::update_trip)
        .service(trips::delete_trip)
        .service(searches::list_searches)
        .service(searches::get_search)
        .service(searches::create_search)
        .service(searches::update_search)
        .service(searches::delete_search)
        .service(histories::list_histories)
        .service(histories::get_history)
        .service(histories::create_history)
        .service(histories::update_history)
        .service(histories::delete_history)
        .service(chat::chat)
}
