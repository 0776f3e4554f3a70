//! Metrics collection and exposition.
//!
//! # Metrics
//! - `lobby_match_requests_total` (counter): match requests by outcome
//! - `lobby_waiting_players` (gauge): 1 while a player holds the slot
//! - `lobby_wait_duration_seconds` (histogram): time spent in the slot
//! - `lobby_stream_errors_total` (counter): failed record writes by stage
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_match_request(outcome: &'static str) {
    ::metrics::counter!("lobby_match_requests_total", "outcome" => outcome).increment(1);
}

pub fn set_waiting_players(count: u8) {
    ::metrics::gauge!("lobby_waiting_players").set(f64::from(count));
}

pub fn record_wait(outcome: &'static str, waited: Duration) {
    ::metrics::histogram!("lobby_wait_duration_seconds", "outcome" => outcome)
        .record(waited.as_secs_f64());
}

pub fn record_stream_error(stage: &'static str) {
    ::metrics::counter!("lobby_stream_errors_total", "stage" => stage).increment(1);
}
