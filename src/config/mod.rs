//! Application configuration loaded from the environment.
//!
//! `.env` is read by `main` before this runs, so every value here may come from
//! either the process environment or that file.

/// Store connection and table creation
pub mod database;

/// Seed data loading from TOML and initial population of the store
pub mod seed;

use crate::{
    core::TransitionPolicy,
    errors::{Error, Result},
};
use std::{net::SocketAddr, path::PathBuf};

/// Default listen address, matching the port the test suites target.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Directory served for paths no route claims.
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Top-level runtime settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIBLIOTECA_ADDR`)
    pub bind_addr: SocketAddr,
    /// SeaORM connection URL (`DATABASE_URL`)
    pub database_url: String,
    /// Optional seed file overriding the embedded defaults (`BIBLIOTECA_SEED`)
    pub seed_path: Option<PathBuf>,
    /// Whether status updates must follow the workflow graph (`BIBLIOTECA_STATUS_POLICY`)
    pub status_policy: TransitionPolicy,
    /// Front-end files served as the fallback (`BIBLIOTECA_STATIC_DIR`)
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: database::DEFAULT_DATABASE_URL.to_string(),
            seed_path: None,
            status_policy: TransitionPolicy::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Builds the configuration from environment variables, falling back to defaults.
///
/// # Errors
/// Returns [`Error::Config`] when a variable is set but cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let bind_addr = std::env::var("BIBLIOTECA_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| Error::Config {
            message: format!("Invalid BIBLIOTECA_ADDR: {e}"),
        })?;

    let status_policy = match std::env::var("BIBLIOTECA_STATUS_POLICY") {
        Ok(value) => value.parse()?,
        Err(_) => TransitionPolicy::default(),
    };

    let seed_path = std::env::var("BIBLIOTECA_SEED")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let static_dir = std::env::var("BIBLIOTECA_STATIC_DIR")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

    let config = AppConfig {
        bind_addr,
        database_url: database::get_database_url(),
        seed_path,
        status_policy,
        static_dir,
    };
    tracing::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
