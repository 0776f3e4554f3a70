//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (--port, --battle-port)
//!     → validation.rs (semantic checks)
//!     → LobbyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::BattleConfig;
pub use schema::ListenerConfig;
pub use schema::LobbyConfig;
pub use schema::MatchmakingConfig;
pub use schema::ObservabilityConfig;
