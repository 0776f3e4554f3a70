//! Request handlers for the lobby endpoints.
//!
//! `GET /match` resolves the battle URL, joins the coordinator and streams the
//! outcome. The response is returned as soon as headers are ready; a spawned
//! task writes the records.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::Instrument;

use crate::http::server::AppState;
use crate::http::stream::{record_stream, StatusSink, StreamError};
use crate::matchmaking::{Arrival, BattleUrl, MatchCoordinator, MatchOutcome, MatchStatus};
use crate::observability::metrics;

/// Drive one match request to its terminal record.
///
/// If the `waiting` record cannot be delivered, the slot is released before
/// returning so a dead connection never holds up future pairings.
pub async fn run_match<S>(
    coordinator: &MatchCoordinator,
    url: BattleUrl,
    sink: &mut S,
) -> Result<MatchOutcome, StreamError>
where
    S: StatusSink,
{
    let outcome = match coordinator.join(url) {
        Arrival::Second(url) => MatchOutcome::Matched { url },
        Arrival::First(ticket) => {
            if let Err(e) = sink.send(&MatchStatus::from(&MatchOutcome::Waiting)).await {
                metrics::record_stream_error("waiting");
                // Dropping the ticket releases the slot.
                drop(ticket);
                return Err(e);
            }
            ticket.wait().await
        }
    };

    if let Err(e) = sink.send(&MatchStatus::from(&outcome)).await {
        metrics::record_stream_error(outcome.label());
        return Err(e);
    }
    Ok(outcome)
}

/// `GET /match`
pub async fn match_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let url = match state.resolver.resolve_request(&headers, &uri) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(error = %e, "Rejecting match request");
            metrics::record_match_request("rejected");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let (mut sink, body) = record_stream();
    let coordinator = state.coordinator.clone();

    tokio::spawn(
        async move {
            match run_match(&coordinator, url, &mut sink).await {
                Ok(outcome) => {
                    tracing::debug!(outcome = outcome.label(), "Match stream complete");
                    metrics::record_match_request(outcome.label());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Match stream aborted");
                    metrics::record_match_request("aborted");
                }
            }
        }
        .in_current_span(),
    );

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// `OPTIONS /match`
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on `/match`.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub waiting: bool,
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        waiting: state.coordinator.is_waiting(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Collects records in memory.
    #[derive(Default)]
    struct VecSink(Vec<MatchStatus>);

    impl StatusSink for VecSink {
        async fn send(&mut self, status: &MatchStatus) -> Result<(), StreamError> {
            self.0.push(status.clone());
            Ok(())
        }
    }

    /// A client that has already hung up.
    struct ClosedSink;

    impl StatusSink for ClosedSink {
        async fn send(&mut self, _status: &MatchStatus) -> Result<(), StreamError> {
            Err(StreamError::Closed)
        }
    }

    fn url(host: &str) -> BattleUrl {
        BattleUrl::new(format!("ws://{}:8081/game", host))
    }

    #[tokio::test]
    async fn test_lone_player_waits_then_times_out() {
        let coordinator = MatchCoordinator::new(Duration::from_millis(50));
        let mut sink = VecSink::default();

        let outcome = run_match(&coordinator, url("alpha"), &mut sink).await.unwrap();

        assert_eq!(outcome, MatchOutcome::Timeout);
        assert_eq!(
            sink.0,
            vec![
                MatchStatus::from(&MatchOutcome::Waiting),
                MatchStatus::from(&MatchOutcome::Timeout),
            ]
        );
        assert!(!coordinator.is_waiting());
    }

    #[tokio::test]
    async fn test_pair_shares_second_players_url() {
        let coordinator = MatchCoordinator::new(Duration::from_secs(5));

        let first = async {
            let mut sink = VecSink::default();
            run_match(&coordinator, url("alpha"), &mut sink).await.unwrap();
            sink.0
        };
        let second = async {
            while !coordinator.is_waiting() {
                tokio::task::yield_now().await;
            }
            let mut sink = VecSink::default();
            run_match(&coordinator, url("beta"), &mut sink).await.unwrap();
            sink.0
        };
        let (first, second) = tokio::join!(first, second);

        let matched = MatchStatus::from(&MatchOutcome::Matched { url: url("beta") });
        assert_eq!(first, vec![MatchStatus::from(&MatchOutcome::Waiting), matched.clone()]);
        assert_eq!(second, vec![matched]);
    }

    #[tokio::test]
    async fn test_failed_waiting_write_releases_slot() {
        let coordinator = MatchCoordinator::new(Duration::from_millis(10));

        let err = run_match(&coordinator, url("alpha"), &mut ClosedSink).await.unwrap_err();

        assert!(matches!(err, StreamError::Closed));
        assert!(!coordinator.is_waiting(), "slot must not outlive the dead connection");

        // The next player starts fresh instead of pairing with the dead one.
        let mut sink = VecSink::default();
        let outcome = run_match(&coordinator, url("beta"), &mut sink).await.unwrap();
        assert_eq!(outcome, MatchOutcome::Timeout);
        assert_eq!(sink.0[0], MatchStatus::from(&MatchOutcome::Waiting));
    }
}
