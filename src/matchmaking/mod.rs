//! Matchmaking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /match
//!     → coordinator.rs (join: first arrival waits, second arrival pairs)
//!     → outcome.rs (Waiting / Matched / Timeout → JSON status record)
//!     → http::stream (records flushed to the client one by one)
//! ```
//!
//! # Design Decisions
//! - One waiting slot per coordinator; no queue
//! - The battle URL is carried by the pairing signal, never stored elsewhere
//! - Timeout is a normal outcome, not an error

pub mod coordinator;
pub mod outcome;

pub use coordinator::{Arrival, MatchCoordinator, WaitTicket, DEFAULT_MATCH_TIMEOUT};
pub use outcome::{BattleUrl, MatchOutcome, MatchStatus, StatusKind};
