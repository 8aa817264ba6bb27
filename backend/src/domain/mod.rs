//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed travel entities used by the API and
//! persistence layers, and the services that coordinate them through the
//! ports in [`ports`]. Document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User, Poi, Ticket, Trip, Search, History — persisted entities.
//! - HistoryService, PoiService — create-or-find use-cases.
//! - TextGenerator — serialised access to the loaded language model.

pub mod error;
pub mod history;
pub mod history_service;
pub mod ids;
pub mod poi;
pub mod poi_service;
pub mod ports;
pub mod search;
pub mod text_generator;
pub mod ticket;
pub mod trace_id;
pub mod trip;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::history::{
    CreateHistoryRequest, EMPTY_HISTORY_PAYLOAD, HISTORY_TICKET_REQUIRED, HISTORY_USER_REQUIRED,
    History, HistoryChanges, NewHistory,
};
pub use self::history_service::HistoryService;
pub use self::ids::{HistoryId, PoiId, PoiImageId, SearchId, TicketId, TripId, UserId};
pub use self::poi::{
    POI_TEXT_MAX, Poi, PoiDraft, PoiImage, PoiImageDraft, PoiLookupKey, PoiValidationError,
};
pub use self::poi_service::PoiService;
pub use self::search::{Search, SearchDraft};
pub use self::text_generator::{GenerationSettings, TextGenerator};
pub use self::ticket::{PoiRef, Ticket, TicketDraft, TicketValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::trip::{Trip, TripDraft, TripValidationError};
pub use self::user::{PSEUDO_MAX, Pseudo, User, UserDraft, UserValidationError};
