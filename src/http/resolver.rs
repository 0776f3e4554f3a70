//! Battle service URL resolution.
//!
//! # Responsibilities
//! - Extract the host the client used to reach the lobby
//! - Strip the lobby port, keep bracketed IPv6 literals intact
//! - Build `{scheme}://{host}:{battle port}{path}`
//!
//! # Design Decisions
//! - Resolved fresh for every request; the result is handed to the
//!   coordinator and never stored in shared state
//! - Hosts are validated with the `url` host parser, so a malformed Host
//!   header cannot produce a malformed URL

use axum::http::{header, HeaderMap, Uri};
use thiserror::Error;
use url::Host;

use crate::config::BattleConfig;
use crate::matchmaking::BattleUrl;

/// Host used when the request carries none.
pub const DEFAULT_HOST: &str = "localhost";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
}

/// Builds battle URLs from request hosts.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    scheme: String,
    port: u16,
    path: String,
}

impl UrlResolver {
    pub fn new(config: &BattleConfig) -> Self {
        Self {
            scheme: config.scheme.clone(),
            port: config.port,
            path: config.path.clone(),
        }
    }

    /// Resolve the URL for a request's headers and URI.
    pub fn resolve_request(&self, headers: &HeaderMap, uri: &Uri) -> Result<BattleUrl, ResolveError> {
        self.resolve(request_host(headers, uri))
    }

    /// Resolve the URL for a raw host, which may include a port.
    pub fn resolve(&self, host: Option<&str>) -> Result<BattleUrl, ResolveError> {
        let name = host
            .map(|h| strip_port(h.trim()))
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HOST);

        let parsed = Host::parse(name).map_err(|source| ResolveError::InvalidHost {
            host: name.to_string(),
            source,
        })?;

        Ok(BattleUrl::new(format!(
            "{}://{}:{}{}",
            self.scheme, parsed, self.port, self.path
        )))
    }
}

/// Host header first, then the URI authority (HTTP/2, absolute-form).
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.host())
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.split_once(':') {
        Some((name, _)) => name,
        None => host,
    }
}
