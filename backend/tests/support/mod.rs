//! Shared helpers for integration tests that need PostgreSQL.
//!
//! Suites read `TEST_DATABASE_URL`. When it is unset they print a
//! `SKIP-TEST-DATABASE` marker and return early, so `cargo test` stays green
//! on machines without a database. Rows are namespaced with a fresh UUID so
//! suites can share one database.

use travel_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use uuid::Uuid;

/// Variable naming the database integration tests run against.
pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

/// Migrated pool for `TEST_DATABASE_URL`, or `None` after printing a skip
/// marker when the variable is unset.
pub async fn migrated_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL) else {
        eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL} is not set");
        return None;
    };
    apply_migrations(url.clone())
        .await
        .unwrap_or_else(|err| panic!("migrations failed against {TEST_DATABASE_URL}: {err}"));
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4))
        .await
        .unwrap_or_else(|err| panic!("pool failed to build: {err}"));
    Some(pool)
}

/// Name unique to one test run.
pub fn unique(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}
