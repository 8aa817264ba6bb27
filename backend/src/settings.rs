//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags and `TRAVEL_*` environment variables. The pool
//! size carries a loader default; accessors apply the remaining defaults.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::GenerationSettings;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MODEL_PATH: &str = "models/llama-2-7b-chat.Q4_0.gguf";
const DEFAULT_MODEL_ENDPOINT: &str = "http://127.0.0.1:8081";
/// Conventional variable consulted when `TRAVEL_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Neither `TRAVEL_DATABASE_URL` nor `DATABASE_URL` is set.
    #[error("database URL missing: set TRAVEL_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    /// The model endpoint is not an absolute URL.
    #[error("invalid model endpoint '{value}': {message}")]
    InvalidModelEndpoint {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAVEL")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// GGUF model file served by the local runner.
    pub model_path: Option<PathBuf>,
    /// Base URL of the llama.cpp runner.
    pub model_endpoint: Option<String>,
}

impl AppSettings {
    /// Database URL, falling back to `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when neither is set.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        resolve_database_url(self.database_url.clone())
    }

    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Pool configuration for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        PoolConfig::new(database_url).with_max_size(self.db_max_connections)
    }

    /// Model file path.
    pub fn model_path(&self) -> &Path {
        self.model_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_MODEL_PATH))
    }

    /// Runner endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidModelEndpoint`] when the value does not
    /// parse as a URL.
    pub fn model_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .model_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_ENDPOINT);
        Url::parse(raw).map_err(|err| SettingsError::InvalidModelEndpoint {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Generation constants used for every prompt.
    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings::default()
    }
}

/// Prefer an explicit URL, then `DATABASE_URL`.
///
/// # Errors
///
/// Returns [`SettingsError::MissingDatabaseUrl`] when neither is present.
pub fn resolve_database_url(explicit: Option<String>) -> Result<String, SettingsError> {
    explicit
        .filter(|url| !url.trim().is_empty())
        .or_else(|| {
            std::env::var(DATABASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
        })
        .ok_or(SettingsError::MissingDatabaseUrl)
}
