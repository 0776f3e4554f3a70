//! Streaming status records onto a held-open response.
//!
//! Each record is one newline-terminated JSON document sent as its own body
//! frame, so the client sees it before the next one is produced. The body ends
//! when the [`RecordStream`] is dropped.

use std::convert::Infallible;
use std::future::Future;

use axum::body::Body;
use bytes::Bytes;
use futures_util::stream;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::matchmaking::MatchStatus;

/// A match stream carries at most a `waiting` and a terminal record.
const RECORD_CAPACITY: usize = 2;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to encode status record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("client disconnected")]
    Closed,
}

/// Destination for status records, one at a time.
pub trait StatusSink {
    /// Write and flush a single record.
    fn send(&mut self, status: &MatchStatus) -> impl Future<Output = Result<(), StreamError>> + Send;
}

/// Channel-backed sink feeding an axum response body.
#[derive(Debug)]
pub struct RecordStream {
    tx: mpsc::Sender<Bytes>,
}

/// Create a sink and the response body it writes into.
pub fn record_stream() -> (RecordStream, Body) {
    let (tx, rx) = mpsc::channel::<Bytes>(RECORD_CAPACITY);
    let frames = stream::unfold(rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|frame| (Ok::<_, Infallible>(frame), rx))
    });
    (RecordStream { tx }, Body::from_stream(frames))
}

impl StatusSink for RecordStream {
    async fn send(&mut self, status: &MatchStatus) -> Result<(), StreamError> {
        let frame = encode(status)?;
        self.tx.send(frame).await.map_err(|_| StreamError::Closed)
    }
}

/// Serialize a record as a JSON line.
pub fn encode(status: &MatchStatus) -> Result<Bytes, serde_json::Error> {
    let mut buf = serde_json::to_vec(status)?;
    buf.push(b'\n');
    Ok(Bytes::from(buf))
}
