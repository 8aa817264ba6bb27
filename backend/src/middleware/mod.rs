//! Actix middleware shared by every route: request tracing.

pub mod trace;

pub use trace::Trace;
