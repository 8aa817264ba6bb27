//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (repositories and use-cases) and remain testable
//! without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    HistoryCommand, HistoryQuery, PoiCommand, PoiRepository, SearchRepository, TextGeneration,
    TicketRepository, TripRepository, UserRepository,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub pois: Arc<dyn PoiRepository>,
    pub poi_command: Arc<dyn PoiCommand>,
    pub tickets: Arc<dyn TicketRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub searches: Arc<dyn SearchRepository>,
    pub histories: Arc<dyn HistoryCommand>,
    pub histories_query: Arc<dyn HistoryQuery>,
    pub text: Arc<dyn TextGeneration>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub pois: Arc<dyn PoiRepository>,
    pub poi_command: Arc<dyn PoiCommand>,
    pub tickets: Arc<dyn TicketRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub searches: Arc<dyn SearchRepository>,
    pub histories: Arc<dyn HistoryCommand>,
    pub histories_query: Arc<dyn HistoryQuery>,
    pub text: Arc<dyn TextGeneration>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            pois,
            poi_command,
            tickets,
            trips,
            searches,
            histories,
            histories_query,
            text,
        } = ports;
        Self {
            users,
            pois,
            poi_command,
            tickets,
            trips,
            searches,
            histories,
            histories_query,
            text,
        }
    }
}
