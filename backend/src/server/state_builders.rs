//! Builders wiring Diesel repositories and domain services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use travel_backend::domain::{HistoryService, PoiService};
use travel_backend::inbound::http::state::{HttpState, HttpStatePorts};
use travel_backend::outbound::persistence::{
    DbPool, DieselHistoryRepository, DieselPoiRepository, DieselSearchRepository,
    DieselTicketRepository, DieselTripRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Repositories sharing one pool.
struct Repositories {
    users: Arc<DieselUserRepository>,
    pois: Arc<DieselPoiRepository>,
    tickets: Arc<DieselTicketRepository>,
    trips: Arc<DieselTripRepository>,
    searches: Arc<DieselSearchRepository>,
    histories: Arc<DieselHistoryRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            pois: Arc::new(DieselPoiRepository::new(pool.clone())),
            tickets: Arc::new(DieselTicketRepository::new(pool.clone())),
            trips: Arc::new(DieselTripRepository::new(pool.clone())),
            searches: Arc::new(DieselSearchRepository::new(pool.clone())),
            histories: Arc::new(DieselHistoryRepository::new(pool.clone())),
        }
    }
}

/// Build the shared HTTP state from the configured pool and text generator.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repos = Repositories::new(&config.db_pool);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let history_service = Arc::new(HistoryService::new(
        repos.histories,
        repos.users.clone(),
        repos.tickets.clone(),
        clock,
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        users: repos.users,
        poi_command: Arc::new(PoiService::new(repos.pois.clone())),
        pois: repos.pois,
        tickets: repos.tickets,
        trips: repos.trips,
        searches: repos.searches,
        histories: history_service.clone(),
        histories_query: history_service,
        text: config.text.clone(),
    }))
}
