//! Simulation harness.
//!
//! Replays a [`BidScript`] against a session, supplies deterministic
//! timestamps, and records every snapshot, rejection, and event. After the
//! script runs out, the harness ticks the session to completion so every
//! report ends with a closed lot.

use crate::script::{BidAmount, BidScript, ScriptAction};
use bidding_core::{Amount, BidderId, SessionSnapshot};
use bidding_engine::{AuctionSession, MemoryEventLog, SessionEvent};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A bid the session refused, with the reason it gave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Who bid.
    pub bidder: BidderId,
    /// The amount that was submitted.
    pub amount: Amount,
    /// Rendered rejection reason.
    pub reason: String,
}

/// Everything a simulation run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    /// Session state after every action, in order.
    pub snapshots: Vec<SessionSnapshot>,
    /// State the session ended in.
    pub final_snapshot: SessionSnapshot,
    /// Number of accepted bids.
    pub accepted: usize,
    /// Refused bids, in order.
    pub rejections: Vec<Rejection>,
    /// Events emitted by the session over the whole run.
    pub events: Vec<SessionEvent>,
}

/// Drives one session with one script.
pub struct Simulator {
    session: AuctionSession,
    script: BidScript,
    started_at: DateTime<Utc>,
}

impl Simulator {
    /// Create a harness around a freshly started session.
    pub fn new(session: AuctionSession, script: BidScript, started_at: DateTime<Utc>) -> Self {
        Self {
            session,
            script,
            started_at,
        }
    }

    /// Run the script to completion, then tick until the session closes.
    pub fn run(mut self) -> SimReport {
        let log = MemoryEventLog::new();
        self.session.subscribe(Box::new(log.clone()));

        let mut elapsed_secs: u64 = 0;
        let mut snapshots = Vec::new();
        let mut rejections = Vec::new();
        let mut accepted = 0;

        for action in self.script.actions().to_vec() {
            match action {
                ScriptAction::Tick(secs) => {
                    elapsed_secs += u64::from(secs);
                    snapshots.push(self.session.tick(secs));
                }
                ScriptAction::Bid { bidder, amount } => {
                    let amount = match amount {
                        BidAmount::Exact(n) => n,
                        BidAmount::NextMinimum => self.session.snapshot().next_minimum_bid,
                    };
                    let now = self.started_at + Duration::seconds(elapsed_secs as i64);
                    match self.session.place_bid(bidder.clone(), amount, now) {
                        Ok(result) => {
                            accepted += 1;
                            snapshots.push(result.snapshot);
                        }
                        Err(err) => {
                            debug!(%bidder, amount, %err, "scripted bid refused");
                            rejections.push(Rejection {
                                bidder,
                                amount,
                                reason: err.to_string(),
                            });
                            snapshots.push(self.session.snapshot());
                        }
                    }
                }
            }
        }

        // Let the clock run out so the report always ends closed.
        while !self.session.is_closed() {
            let remaining = self.session.snapshot().remaining_secs;
            snapshots.push(self.session.tick(remaining.max(1)));
        }

        SimReport {
            final_snapshot: self.session.snapshot(),
            snapshots,
            accepted,
            rejections,
            events: log.events(),
        }
    }
}
