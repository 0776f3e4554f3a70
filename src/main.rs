//! Lobby Server
//!
//! Pairs players for battle sessions over a long-poll HTTP endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                   LOBBY SERVER                    │
//!                         │                                                   │
//!   GET /match            │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ──────────────────────┼─▶│  http   │───▶│ resolver │───▶│ coordinator │  │
//!                         │  │ server  │    │host→wsUrl│    │ single slot │  │
//!                         │  └─────────┘    └──────────┘    └──────┬──────┘  │
//!                         │                                        │         │
//!   waiting / matched /   │  ┌──────────────────────┐              │         │
//!   timeout (JSON lines)  │  │ stream (one frame    │◀─────────────┘         │
//!   ◀─────────────────────┼──│ per status record)   │                        │
//!                         │  └──────────────────────┘                        │
//!                         │                                                   │
//!                         │  config · lifecycle · observability               │
//!                         └──────────────────────────────────────────────────┘
//! ```
//!
//! Matched clients connect to the battle service themselves at
//! `ws://<lobby host>:<battle port>/game`; the lobby never opens it.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use lobby_server::http::LobbyServer;
use lobby_server::lifecycle::startup::{self, Overrides, StartupError};
use lobby_server::lifecycle::Shutdown;
use lobby_server::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "lobby-server", version)]
#[command(about = "Pairs players and hands them the battle server URL", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to run the lobby server on [default: 8080]
    #[arg(long)]
    port: Option<u16>,

    /// Port for the battle server [default: 8081]
    #[arg(long)]
    battle_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(&Overrides {
        config_path: cli.config,
        port: cli.port,
        battle_port: cli.battle_port,
    })?;

    logging::init(&config.observability);
    tracing::info!("lobby-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        battle_port = config.battle.port,
        match_timeout_secs = config.matchmaking.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr).map_err(StartupError::from)?;
    }

    let listener = startup::bind(&config.listener).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = LobbyServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
