//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the language model) describe what the domain
//! needs from outbound adapters. Driving ports (commands, queries, text
//! generation) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod history_command;
mod history_repository;
mod language_model;
mod poi_command;
mod poi_repository;
mod repository_error;
mod search_repository;
mod text_generation;
mod ticket_repository;
mod trip_repository;
mod user_repository;

pub use history_command::{HistoryCommand, HistoryQuery};
#[cfg(test)]
pub use history_command::{MockHistoryCommand, MockHistoryQuery};
pub use history_repository::HistoryRepository;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
pub use language_model::{InferenceParams, LanguageModel, LanguageModelError};
#[cfg(test)]
pub use language_model::MockLanguageModel;
#[cfg(test)]
pub use poi_command::MockPoiCommand;
pub use poi_command::PoiCommand;
#[cfg(test)]
pub use poi_repository::MockPoiRepository;
pub use poi_repository::PoiRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use search_repository::MockSearchRepository;
pub use search_repository::SearchRepository;
#[cfg(test)]
pub use text_generation::MockTextGeneration;
pub use text_generation::{TextGeneration, TextGenerationError};
#[cfg(test)]
pub use ticket_repository::MockTicketRepository;
pub use ticket_repository::TicketRepository;
#[cfg(test)]
pub use trip_repository::MockTripRepository;
pub use trip_repository::TripRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
