use reqwest::{header::HOST, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lobby returned error status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed status record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("stream ended before a terminal record")]
    Incomplete,
}

/// One status record from `GET /match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub status: String,
    pub message: String,
    #[serde(rename = "wsUrl", default, skip_serializing_if = "Option::is_none")]
    pub ws_url: Option<String>,
}

impl MatchRecord {
    pub fn is_terminal(&self) -> bool {
        self.status != "waiting"
    }
}

pub struct LobbyClient {
    client: Client,
    lobby_url: String,
    host: Option<String>,
}

impl LobbyClient {
    pub fn new(lobby_url: &str) -> Self {
        Self {
            client: Client::new(),
            lobby_url: lobby_url.trim_end_matches('/').to_string(),
            host: None,
        }
    }

    /// Send this value as the Host header instead of the URL's authority.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Open a match stream. Records are read with [`MatchSession::next_record`].
    pub async fn find_match(&self) -> Result<MatchSession, ClientError> {
        let mut request = self.client.get(format!("{}/match", self.lobby_url));
        if let Some(host) = &self.host {
            request = request.header(HOST, host);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(MatchSession {
            response,
            buffer: Vec::new(),
        })
    }

    /// Fetch the lobby health document.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.lobby_url))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}

/// An open `GET /match` response delivering newline-delimited records.
pub struct MatchSession {
    response: Response,
    buffer: Vec<u8>,
}

impl MatchSession {
    /// Next record, or `None` once the lobby closes the stream.
    pub async fn next_record(&mut self) -> Result<Option<MatchRecord>, ClientError> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=pos).collect();
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                return Ok(Some(serde_json::from_slice(&line)?));
            }

            match self.response.chunk().await? {
                Some(chunk) => self.buffer.extend_from_slice(&chunk),
                None if self.buffer.iter().all(u8::is_ascii_whitespace) => return Ok(None),
                None => {
                    let rest = std::mem::take(&mut self.buffer);
                    return Ok(Some(serde_json::from_slice(&rest)?));
                }
            }
        }
    }

    /// Read until the terminal record (`matched` or `timeout`).
    pub async fn outcome(mut self) -> Result<MatchRecord, ClientError> {
        while let Some(record) = self.next_record().await? {
            if record.is_terminal() {
                return Ok(record);
            }
        }
        Err(ClientError::Incomplete)
    }
}
