//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the lobby handlers
//! - Wire up middleware (tracing, request ID, CORS headers)
//! - Own the coordinator and resolver shared by every request
//! - Serve until a shutdown signal arrives

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::LobbyConfig;
use crate::http::handler::{health_handler, match_handler, method_not_allowed, preflight};
use crate::http::resolver::UrlResolver;
use crate::matchmaking::MatchCoordinator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<MatchCoordinator>,
    pub resolver: Arc<UrlResolver>,
}

impl AppState {
    pub fn from_config(config: &LobbyConfig) -> Self {
        Self {
            coordinator: Arc::new(MatchCoordinator::new(config.matchmaking.timeout())),
            resolver: Arc::new(UrlResolver::new(&config.battle)),
        }
    }
}

/// HTTP server for the lobby.
pub struct LobbyServer {
    router: Router,
    config: LobbyConfig,
}

impl LobbyServer {
    /// Create a new lobby server with the given configuration.
    pub fn new(config: LobbyConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = build_router(state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            battle_port = self.config.battle.port,
            match_timeout_secs = self.config.matchmaking.timeout_secs,
            "Lobby server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Lobby server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    let match_routes = Router::new()
        .route(
            "/match",
            get(match_handler)
                .head(method_not_allowed)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors);

    Router::new()
        .merge(match_routes)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
