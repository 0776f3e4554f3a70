//! Shared utilities for integration tests.

use std::net::SocketAddr;

use lobby_server::config::LobbyConfig;
use lobby_server::http::LobbyServer;
use lobby_server::lifecycle::Shutdown;
use lobby_sdk::LobbyClient;
use tokio::net::TcpListener;

/// A lobby running on an ephemeral local port.
pub struct TestLobby {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestLobby {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client presenting `host` as the Host header.
    pub fn client(&self, host: &str) -> LobbyClient {
        LobbyClient::new(&self.url()).with_host(host)
    }
}

impl Drop for TestLobby {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a lobby with the given configuration.
pub async fn start_lobby(config: LobbyConfig) -> TestLobby {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = LobbyServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestLobby { addr, shutdown }
}

/// Default configuration with a short matchmaking timeout.
#[allow(dead_code)]
pub fn quick_timeout_config(timeout_secs: u64) -> LobbyConfig {
    let mut config = LobbyConfig::default();
    config.matchmaking.timeout_secs = timeout_secs;
    config
}
