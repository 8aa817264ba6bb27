//! Outbound adapters: PostgreSQL repositories in [`persistence`] and the
//! llama.cpp runner client in [`llm`].
//!
//! Adapters translate rows and wire formats into domain types. Create-or-find
//! decisions stay in the domain services.

pub mod llm;
pub mod persistence;
