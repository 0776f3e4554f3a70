//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! matchmaking + http produce:
//!     → logging.rs (structured log events, request IDs via tower-http)
//!     → metrics.rs (counters, gauge, histogram)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
