//! Lobby server library: pairs players two at a time and hands both the
//! battle service URL over a long-poll HTTP stream.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod matchmaking;
pub mod observability;

pub use config::LobbyConfig;
pub use http::LobbyServer;
pub use lifecycle::Shutdown;
pub use matchmaking::MatchCoordinator;
