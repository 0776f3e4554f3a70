//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, timeout)
//! - Check the battle URL template is well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LobbyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::LobbyConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be non-zero")]
    ZeroPort { field: &'static str },

    #[error("lobby and battle service cannot share port {0}")]
    PortConflict(u16),

    #[error("matchmaking.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("battle.scheme must be \"ws\" or \"wss\", got {0:?}")]
    UnsupportedScheme(String),

    #[error("battle.path must start with '/', got {0:?}")]
    RelativePath(String),

    #[error("observability.metrics_address is not a socket address: {0:?}")]
    MetricsAddress(String),
}

pub fn validate_config(config: &LobbyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort { field: "listener.port" });
    }
    if config.battle.port == 0 {
        errors.push(ValidationError::ZeroPort { field: "battle.port" });
    }
    if config.listener.port != 0 && config.listener.port == config.battle.port {
        errors.push(ValidationError::PortConflict(config.listener.port));
    }
    if config.matchmaking.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if !matches!(config.battle.scheme.as_str(), "ws" | "wss") {
        errors.push(ValidationError::UnsupportedScheme(config.battle.scheme.clone()));
    }
    if !config.battle.path.starts_with('/') {
        errors.push(ValidationError::RelativePath(config.battle.path.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<std::net::SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
