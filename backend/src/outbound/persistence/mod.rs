//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel, with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Create-or-find reconciliation lives in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-aware errors**: unique and foreign-key violations are
//!   reported as such so callers can reconcile or answer with a conflict.
//!
//! # Example
//!
//! ```no_run
//! use travel_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/travel")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_history_repository;
mod diesel_poi_repository;
mod diesel_search_repository;
mod diesel_ticket_repository;
mod diesel_trip_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_history_repository::DieselHistoryRepository;
pub use diesel_poi_repository::DieselPoiRepository;
pub use diesel_search_repository::DieselSearchRepository;
pub use diesel_ticket_repository::DieselTicketRepository;
pub use diesel_trip_repository::DieselTripRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
