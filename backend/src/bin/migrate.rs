//! Apply pending schema migrations and exit.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use travel_backend::outbound::persistence::run_pending_migrations;
use travel_backend::settings::resolve_database_url;

/// `migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "migrate",
    about = "Apply pending travel schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url).map_err(io::Error::other)?;
    let applied = run_pending_migrations(&database_url).map_err(io::Error::other)?;

    if applied.is_empty() {
        println!("schema already up to date");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}
