//! Client for the lobby server's match endpoint.

pub mod client;

pub use client::{ClientError, LobbyClient, MatchRecord, MatchSession};
