//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section is optional; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the lobby server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LobbyConfig {
    /// Where the lobby accepts match requests.
    pub listener: ListenerConfig,

    /// How clients reach the battle service once paired.
    pub battle: BattleConfig,

    /// Rendezvous settings.
    pub matchmaking: MatchmakingConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub address: String,

    /// Lobby port.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        if self.address.contains(':') {
            format!("[{}]:{}", self.address, self.port)
        } else {
            format!("{}:{}", self.address, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Battle service URL template: `{scheme}://{request host}:{port}{path}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BattleConfig {
    /// WebSocket scheme, `ws` or `wss`.
    pub scheme: String,

    /// Battle service port.
    pub port: u16,

    /// Path of the game endpoint.
    pub path: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            scheme: "ws".to_string(),
            port: 8081,
            path: "/game".to_string(),
        }
    }
}

/// Matchmaking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// Seconds a first arrival waits for an opponent.
    pub timeout_secs: u64,
}

impl MatchmakingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self { timeout_secs: 180 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_format: bool,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_format: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
