//! Two-party rendezvous over a single waiting slot.
//!
//! # State Transitions
//! ```text
//! empty  ──join──▶ waiting(ticket)          first arrival gets a WaitTicket
//! waiting ──join──▶ empty                   second arrival signals the ticket
//! waiting ──expire/drop (same ticket)──▶ empty
//! ```
//!
//! Every check-and-act on the slot runs under one lock and never awaits.
//! The battle URL travels inside the signal, so the waiting side always
//! receives the value resolved for its own pair.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::matchmaking::outcome::{BattleUrl, MatchOutcome};
use crate::observability::metrics;

/// How long a first arrival waits for an opponent.
pub const DEFAULT_MATCH_TIMEOUT: Duration = Duration::from_secs(180);

/// The single pending, unmatched player.
struct WaitingSlot {
    ticket: Uuid,
    signal: oneshot::Sender<BattleUrl>,
}

/// Result of joining the coordinator.
pub enum Arrival<'a> {
    /// No one was waiting; the caller now owns the slot.
    First(WaitTicket<'a>),
    /// The caller completed a pair and should report this URL.
    Second(BattleUrl),
}

/// Pairs arriving players two at a time.
pub struct MatchCoordinator {
    slot: Mutex<Option<WaitingSlot>>,
    timeout: Duration,
}

impl MatchCoordinator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a player is currently waiting for an opponent.
    pub fn is_waiting(&self) -> bool {
        self.lock_slot().is_some()
    }

    /// Join the lobby with the URL resolved for this request.
    ///
    /// The first caller receives a [`WaitTicket`]; the next caller signals
    /// that ticket with its own URL and gets the same URL back.
    pub fn join(&self, url: BattleUrl) -> Arrival<'_> {
        let mut slot = self.lock_slot();

        if let Some(waiting) = slot.take() {
            let ticket = waiting.ticket;
            match waiting.signal.send(url.clone()) {
                Ok(()) => {
                    metrics::set_waiting_players(0);
                    tracing::info!(ticket = %ticket, ws_url = %url, "Opponent paired");
                    return Arrival::Second(url);
                }
                Err(_) => {
                    // Owner went away without releasing; take its place.
                    tracing::warn!(ticket = %ticket, "Discarding abandoned waiting slot");
                }
            }
        }

        let ticket = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        *slot = Some(WaitingSlot { ticket, signal: tx });
        drop(slot);

        metrics::set_waiting_players(1);
        tracing::info!(ticket = %ticket, "Player waiting for opponent");

        Arrival::First(WaitTicket {
            coordinator: self,
            id: ticket,
            signal: rx,
            opened_at: Instant::now(),
        })
    }

    /// Clear the slot if it still belongs to `ticket`.
    fn release(&self, ticket: Uuid) -> bool {
        let mut slot = self.lock_slot();
        match slot.as_ref() {
            Some(waiting) if waiting.ticket == ticket => {
                *slot = None;
                metrics::set_waiting_players(0);
                true
            }
            _ => false,
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<WaitingSlot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MatchCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_TIMEOUT)
    }
}

/// Ownership of the waiting slot held by the first arrival.
///
/// Dropping an unresolved ticket releases the slot, so an abandoned request
/// never blocks future pairings.
pub struct WaitTicket<'a> {
    coordinator: &'a MatchCoordinator,
    id: Uuid,
    signal: oneshot::Receiver<BattleUrl>,
    opened_at: Instant,
}

impl WaitTicket<'_> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for an opponent or for the coordinator's timeout.
    pub async fn wait(mut self) -> MatchOutcome {
        let timeout = self.coordinator.timeout;
        let signaled = tokio::time::timeout(timeout, &mut self.signal).await;
        let outcome = match signaled {
            Ok(Ok(url)) => MatchOutcome::Matched { url },
            Ok(Err(_)) | Err(_) => self.expire(),
        };

        metrics::record_wait(outcome.label(), self.opened_at.elapsed());
        tracing::debug!(
            ticket = %self.id,
            outcome = outcome.label(),
            waited_ms = self.opened_at.elapsed().as_millis() as u64,
            "Wait finished"
        );
        outcome
    }

    /// Resolve an expired wait.
    ///
    /// A second arrival that took the slot has already sent its URL while
    /// holding the lock, so losing the compare-and-clear means we were paired.
    fn expire(&mut self) -> MatchOutcome {
        if self.coordinator.release(self.id) {
            tracing::info!(ticket = %self.id, "No opponent found before timeout");
            return MatchOutcome::Timeout;
        }
        match self.signal.try_recv() {
            Ok(url) => MatchOutcome::Matched { url },
            Err(_) => MatchOutcome::Timeout,
        }
    }
}

impl Drop for WaitTicket<'_> {
    fn drop(&mut self) {
        if self.coordinator.release(self.id) {
            tracing::debug!(ticket = %self.id, "Waiting slot released");
        }
    }
}
