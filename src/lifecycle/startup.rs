//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Validate the merged result
//! - Bind the lobby listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Overrides are applied before validation, so a file that is only
//!   valid after an override is accepted

use std::path::PathBuf;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::loader::{read_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::{ListenerConfig, LobbyConfig};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub battle_port: Option<u16>,
}

/// Build the effective configuration.
pub fn resolve_config(overrides: &Overrides) -> Result<LobbyConfig, StartupError> {
    let mut config = match &overrides.config_path {
        Some(path) => read_config(path)?,
        None => LobbyConfig::default(),
    };

    if let Some(port) = overrides.port {
        config.listener.port = port;
    }
    if let Some(port) = overrides.battle_port {
        config.battle.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Bind the lobby listener.
pub async fn bind(listener: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address = listener.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
