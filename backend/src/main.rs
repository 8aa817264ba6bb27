//! Backend entry-point: applies migrations, loads the language model and
//! serves the REST API until shutdown.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use travel_backend::domain::TextGenerator;
use travel_backend::inbound::http::health::HealthState;
use travel_backend::outbound::llm::LlamaCppModel;
use travel_backend::outbound::persistence::{DbPool, apply_migrations};
use travel_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;

    let applied = apply_migrations(database_url.clone())
        .await
        .map_err(io::Error::other)?;
    info!(applied = applied.len(), "database schema up to date");

    let db_pool = DbPool::new(settings.pool_config(&database_url))
        .await
        .map_err(io::Error::other)?;

    let generation = settings.generation();
    let endpoint = settings.model_endpoint().map_err(io::Error::other)?;
    let model = LlamaCppModel::load(settings.model_path(), &endpoint, &generation)
        .await
        .map_err(|e| {
            error!(error = %e, "language model failed to load");
            io::Error::other(e)
        })?;
    let text = Arc::new(TextGenerator::new(Box::new(model), &generation));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr(), db_pool, text.clone()),
    )?;
    let result = server.await;

    health_state.mark_unhealthy();
    text.shutdown().await;
    info!("shutdown complete");
    result
}
