//! Match outcomes and their wire representation.
//!
//! # Wire Format
//! ```text
//! {"status":"waiting","message":"Waiting for opponent..."}
//! {"status":"matched","message":"Opponent found!","wsUrl":"ws://host:8081/game"}
//! {"status":"timeout","message":"No opponent found. Please try again."}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub const WAITING_MESSAGE: &str = "Waiting for opponent...";
pub const MATCHED_MESSAGE: &str = "Opponent found!";
pub const TIMEOUT_MESSAGE: &str = "No opponent found. Please try again.";

/// Connection URL of the battle service handed to both members of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleUrl(String);

impl BattleUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BattleUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State reported to a client over its match stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// First arrival, holding the slot until an opponent shows up.
    Waiting,
    /// Paired; both sides receive the same URL.
    Matched { url: BattleUrl },
    /// No opponent arrived before the wait expired.
    Timeout,
}

impl MatchOutcome {
    /// Whether the stream ends after this outcome.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchOutcome::Waiting)
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Waiting => "waiting",
            MatchOutcome::Matched { .. } => "matched",
            MatchOutcome::Timeout => "timeout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Waiting,
    Matched,
    Timeout,
}

/// A single JSON record written to the match stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub status: StatusKind,
    pub message: String,
    #[serde(rename = "wsUrl", default, skip_serializing_if = "Option::is_none")]
    pub ws_url: Option<String>,
}

impl From<&MatchOutcome> for MatchStatus {
    fn from(outcome: &MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Waiting => Self {
                status: StatusKind::Waiting,
                message: WAITING_MESSAGE.to_string(),
                ws_url: None,
            },
            MatchOutcome::Matched { url } => Self {
                status: StatusKind::Matched,
                message: MATCHED_MESSAGE.to_string(),
                ws_url: Some(url.to_string()),
            },
            MatchOutcome::Timeout => Self {
                status: StatusKind::Timeout,
                message: TIMEOUT_MESSAGE.to_string(),
                ws_url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_record_omits_url() {
        let json = serde_json::to_string(&MatchStatus::from(&MatchOutcome::Waiting)).unwrap();
        assert_eq!(json, r#"{"status":"waiting","message":"Waiting for opponent..."}"#);
    }

    #[test]
    fn test_matched_record_carries_url() {
        let outcome = MatchOutcome::Matched {
            url: BattleUrl::new("ws://lobby.example:8081/game"),
        };
        let json = serde_json::to_string(&MatchStatus::from(&outcome)).unwrap();
        assert_eq!(
            json,
            r#"{"status":"matched","message":"Opponent found!","wsUrl":"ws://lobby.example:8081/game"}"#
        );
    }

    #[test]
    fn test_timeout_record() {
        let value = serde_json::to_value(MatchStatus::from(&MatchOutcome::Timeout)).unwrap();
        assert_eq!(value["status"], "timeout");
        assert_eq!(value["message"], "No opponent found. Please try again.");
        assert!(value.get("wsUrl").is_none());
    }

    #[test]
    fn test_terminal_outcomes() {
        assert!(!MatchOutcome::Waiting.is_terminal());
        assert!(MatchOutcome::Timeout.is_terminal());
        assert!(MatchOutcome::Matched { url: BattleUrl::new("ws://a:1/game") }.is_terminal());
    }
}
