//! ComplaintFeed: per-complaint change signals
//!
//! ```text
//! PostgreSQL NOTIFY complaint_changes
//!       │ "status_update:<id>" / "complaint:<id>"
//!       ▼
//! listener task ──► ComplaintFeed
//!                     └── complaint_id → broadcast::Sender<ComplaintChange>
//!                           │
//!                           ▼
//!                   tracking WS handlers (re-fetch → rebuild timeline → push)
//! ```
//!
//! A signal carries no data. Subscribers re-read the complaint and its
//! status updates and rebuild the timeline from scratch.

pub mod listener;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Which record changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintChange {
    /// The complaint row itself (e.g. its status column)
    Complaint,
    /// A status update was appended
    StatusUpdate,
}

/// Enough to absorb a burst of updates between two re-fetches
const BROADCAST_CAPACITY: usize = 32;

#[derive(Clone, Default)]
pub struct ComplaintFeed {
    /// complaint_id → channel
    channels: Arc<DashMap<i64, broadcast::Sender<ComplaintChange>>>,
}

impl ComplaintFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, complaint_id: i64) -> broadcast::Receiver<ComplaintChange> {
        self.channels
            .entry(complaint_id)
            .or_insert_with(|| broadcast::channel(BROADCAST_CAPACITY).0)
            .subscribe()
    }

    /// Signal a change; returns how many subscribers were reached
    pub fn publish(&self, complaint_id: i64, change: ComplaintChange) -> usize {
        match self.channels.get(&complaint_id) {
            // No receivers left: send fails, nothing to do
            Some(tx) => tx.send(change).unwrap_or(0),
            None => 0,
        }
    }

    pub fn subscriber_count(&self, complaint_id: i64) -> usize {
        self.channels
            .get(&complaint_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Drop channels nobody listens to anymore; returns how many were removed
    pub fn prune(&self) -> usize {
        let before = self.channels.len();
        self.channels.retain(|_, tx| tx.receiver_count() > 0);
        before - self.channels.len()
    }
}

/// Consume signals already queued behind the one just received
///
/// One commit fires both triggers, so a re-fetch after the first signal
/// already covers the rest. Returns how many were skipped.
pub fn drain_pending(rx: &mut broadcast::Receiver<ComplaintChange>) -> usize {
    let mut skipped = 0;
    loop {
        match rx.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => skipped += 1,
            Err(TryRecvError::Empty | TryRecvError::Closed) => return skipped,
        }
    }
}
