//! Session events for external collaborators.
//!
//! The session emits an event for every state change worth persisting. A
//! durability layer subscribes through [`EventSink`] and writes events to
//! whatever storage it owns; the engine itself never holds a storage handle.

use bidding_core::{Bid, LotId, Seconds};
use serde::{Deserialize, Serialize};

/// Why a session closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// The countdown reached zero.
    Expired,
    /// An administrator closed the lot early.
    Forced,
}

/// A state change emitted by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The lot went live.
    Opened {
        lot_id: LotId,
        starting_price: bidding_core::Amount,
        duration_secs: Seconds,
    },
    /// A bid was accepted into the ledger.
    BidAccepted { bid: Bid },
    /// The anti-snipe rule extended the clock.
    ClockExtended {
        lot_id: LotId,
        remaining_secs: Seconds,
    },
    /// The session reached its terminal state.
    Closed { lot_id: LotId, reason: CloseReason },
}

impl SessionEvent {
    /// The lot this event belongs to.
    pub fn lot_id(&self) -> &str {
        match self {
            SessionEvent::Opened { lot_id, .. } => lot_id,
            SessionEvent::BidAccepted { bid } => &bid.lot_id,
            SessionEvent::ClockExtended { lot_id, .. } => lot_id,
            SessionEvent::Closed { lot_id, .. } => lot_id,
        }
    }
}

/// Receiver for session events.
pub trait EventSink {
    /// Handle one event. Called synchronously from the session's mutating
    /// operations; implementations must not call back into the session.
    fn publish(&mut self, event: &SessionEvent);
}

/// Event sink that keeps everything in memory. The reference persistence
/// adapter, also used by tests to assert on emitted events.
///
/// Cloning produces another handle to the same underlying log, so a caller
/// can keep one handle and hand the other to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    events: std::sync::Arc<std::sync::Mutex<Vec<SessionEvent>>>,
}

impl MemoryEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in emission order.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().expect("event log lock").clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().expect("event log lock").len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain recorded events, leaving the log empty.
    pub fn take(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.lock().expect("event log lock"))
    }
}

impl EventSink for MemoryEventLog {
    fn publish(&mut self, event: &SessionEvent) {
        self.events
            .lock()
            .expect("event log lock")
            .push(event.clone());
    }
}
