//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, CORS headers)
//!     → handler.rs (method dispatch for /match and /health)
//!     → resolver.rs (request host → battle URL)
//!     → matchmaking coordinator (join)
//!     → stream.rs (status records flushed to the client)
//! ```

pub mod handler;
pub mod resolver;
pub mod server;
pub mod stream;

pub use resolver::{ResolveError, UrlResolver};
pub use server::{build_router, AppState, LobbyServer};
pub use stream::{record_stream, RecordStream, StatusSink, StreamError};
