//! Auction session: one lot, one ledger, one clock.
//!
//! The session is the single entry point external callers use to query state
//! or submit a bid. It is designed for one logical owner; `tick` and
//! `place_bid` must be serialized by the caller. Ticking is driven by an
//! external scheduler supplying explicit deltas, which keeps every run
//! reproducible.

use crate::clock::{AuctionClock, ClockState};
use crate::event::{CloseReason, EventSink, SessionEvent};
use crate::ledger::BidLedger;
use bidding_core::{
    Amount, AuctionConfig, BidAccepted, BidError, BidderId, Lot, LotStatus, Result, Seconds,
    SessionSnapshot,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// A running auction for exactly one lot.
pub struct AuctionSession {
    lot: Lot,
    ledger: BidLedger,
    clock: AuctionClock,
    threshold_secs: Seconds,
    extension_secs: Seconds,
    sinks: Vec<Box<dyn EventSink>>,
}

impl AuctionSession {
    /// Start an auction for `lot`.
    ///
    /// Validates the lot once; a lot that passes here cannot produce
    /// construction-class errors during steady-state operation. The lot
    /// status moves to `Live` and an `Opened` event is emitted to any sink
    /// registered afterwards via the returned session.
    pub fn start(lot: Lot, config: &AuctionConfig) -> Result<Self> {
        lot.validate()?;

        let mut lot = lot;
        lot.status = LotStatus::Live;

        info!(
            lot_id = %lot.id,
            starting_price = lot.starting_price,
            duration_secs = lot.duration_secs,
            "auction opened"
        );

        let ledger = BidLedger::new(lot.id.clone(), lot.starting_price, lot.increment);
        let clock = AuctionClock::new(lot.duration_secs);

        Ok(Self {
            lot,
            ledger,
            clock,
            threshold_secs: config.anti_snipe.threshold_secs,
            extension_secs: config.anti_snipe.extension_secs,
            sinks: Vec::new(),
        })
    }

    /// Register a sink for session events. The `Opened` event for this
    /// session is replayed to the new sink so late subscribers see the full
    /// stream.
    pub fn subscribe(&mut self, mut sink: Box<dyn EventSink>) {
        sink.publish(&SessionEvent::Opened {
            lot_id: self.lot.id.clone(),
            starting_price: self.lot.starting_price,
            duration_secs: self.lot.duration_secs,
        });
        self.sinks.push(sink);
    }

    fn emit(&mut self, event: SessionEvent) {
        for sink in &mut self.sinks {
            sink.publish(&event);
        }
    }

    /// Submit a bid.
    ///
    /// Rejects with `AuctionClosed` once the clock is closed, otherwise
    /// delegates validation to the ledger and propagates its error
    /// unchanged. An accepted bid inside the anti-snipe window extends the
    /// clock before the snapshot is taken.
    pub fn place_bid(
        &mut self,
        bidder_id: impl Into<BidderId>,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> std::result::Result<BidAccepted, BidError> {
        if self.clock.state() == ClockState::Closed {
            warn!(lot_id = %self.lot.id, amount, "bid rejected: auction closed");
            return Err(BidError::AuctionClosed);
        }

        let bid = match self.ledger.submit_bid(bidder_id, amount, now) {
            Ok(bid) => bid,
            Err(err) => {
                warn!(lot_id = %self.lot.id, amount, %err, "bid rejected");
                return Err(err);
            }
        };

        debug!(
            lot_id = %self.lot.id,
            bidder_id = %bid.bidder_id,
            amount = bid.amount,
            "bid accepted"
        );
        self.emit(SessionEvent::BidAccepted { bid: bid.clone() });

        if self
            .clock
            .extend_if_near(self.threshold_secs, self.extension_secs)
        {
            info!(
                lot_id = %self.lot.id,
                remaining_secs = self.clock.remaining_secs(),
                "anti-snipe extension applied"
            );
            self.emit(SessionEvent::ClockExtended {
                lot_id: self.lot.id.clone(),
                remaining_secs: self.clock.remaining_secs(),
            });
        }

        Ok(BidAccepted {
            bid,
            snapshot: self.snapshot(),
        })
    }

    /// Advance the clock by `delta_secs`.
    ///
    /// On the transition to zero the lot is marked `Closed` and a `Closed`
    /// event is emitted; from then on `place_bid` always fails with
    /// `AuctionClosed`. Further ticks are no-ops.
    pub fn tick(&mut self, delta_secs: Seconds) -> SessionSnapshot {
        let was_live = self.clock.state() == ClockState::Live;
        if self.clock.tick(delta_secs) == ClockState::Closed && was_live {
            self.close(CloseReason::Expired);
        }
        self.snapshot()
    }

    /// Close the session early (admin override). Idempotent.
    pub fn force_close(&mut self) {
        if self.lot.status == LotStatus::Closed {
            return;
        }
        self.clock.force_expire();
        self.close(CloseReason::Forced);
    }

    fn close(&mut self, reason: CloseReason) {
        self.lot.status = LotStatus::Closed;
        info!(lot_id = %self.lot.id, ?reason, "auction closed");
        self.emit(SessionEvent::Closed {
            lot_id: self.lot.id.clone(),
            reason,
        });
    }

    /// Read-only view of the session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            lot_id: self.lot.id.clone(),
            current_bid: self.ledger.current_bid(),
            next_minimum_bid: self.ledger.next_minimum_bid(),
            remaining_secs: self.clock.remaining_secs(),
            progress_ratio: self.clock.progress_ratio(),
            total_bid_count: self.ledger.total_bid_count(),
            status: self.lot.status,
        }
    }

    /// The lot as the session sees it (status kept current).
    pub fn lot(&self) -> &Lot {
        &self.lot
    }

    /// The bid history, newest-last.
    pub fn history(&self) -> &[bidding_core::Bid] {
        self.ledger.history()
    }

    /// Whether the session has reached its terminal state.
    pub fn is_closed(&self) -> bool {
        self.lot.status == LotStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MemoryEventLog;
    use approx::assert_relative_eq;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn make_lot() -> Lot {
        Lot::new("lot-1", "Nocturne in Gold", "A. Whistler", 40_000, 500, 120)
    }

    fn make_session() -> AuctionSession {
        AuctionSession::start(make_lot(), &AuctionConfig::default()).unwrap()
    }

    #[test]
    fn test_start_goes_live() {
        let session = make_session();
        let snap = session.snapshot();
        assert_eq!(snap.status, LotStatus::Live);
        assert_eq!(snap.current_bid, 40_000);
        assert_eq!(snap.next_minimum_bid, 40_500);
        assert_eq!(snap.remaining_secs, 120);
        assert_eq!(snap.total_bid_count, 0);
        assert_relative_eq!(snap.progress_ratio, 0.0);
    }

    #[test]
    fn test_start_rejects_invalid_lot() {
        let mut lot = make_lot();
        lot.duration_secs = 0;
        assert!(AuctionSession::start(lot, &AuctionConfig::default()).is_err());
    }

    #[test]
    fn test_scenario_a_minimum_enforcement() {
        let mut session = make_session();

        let err = session.place_bid("bidder-500", 39_000, now()).unwrap_err();
        assert_eq!(err, BidError::BelowMinimum { minimum: 40_500 });

        let accepted = session.place_bid("bidder-500", 40_500, now()).unwrap();
        assert_eq!(accepted.bid.amount, 40_500);
        assert_eq!(accepted.snapshot.current_bid, 40_500);
        assert_eq!(accepted.snapshot.next_minimum_bid, 41_000);
    }

    #[test]
    fn test_scenario_b_anti_snipe_extension() {
        let mut session = make_session();
        session.tick(110); // 10s left, inside the 30s window

        let accepted = session.place_bid("alice", 40_500, now()).unwrap();
        assert_eq!(accepted.snapshot.remaining_secs, 30);
    }

    #[test]
    fn test_scenario_c_closed_rejects_valid_bids() {
        let mut session = make_session();
        session.tick(120);
        assert!(session.is_closed());

        let before = session.snapshot();
        let err = session.place_bid("alice", 50_000, now()).unwrap_err();
        assert_eq!(err, BidError::AuctionClosed);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_scenario_d_hundred_sequential_bids() {
        let mut session = make_session();
        for i in 0..100 {
            let minimum = session.snapshot().next_minimum_bid;
            session
                .place_bid(format!("bidder-{i}"), minimum, now())
                .unwrap();
        }
        let snap = session.snapshot();
        assert_eq!(snap.current_bid, 40_000 + 100 * 500);
        assert_eq!(snap.total_bid_count, 100);
    }

    #[test]
    fn test_bid_outside_window_does_not_extend() {
        let mut session = make_session();
        session.tick(60); // 60s left
        let accepted = session.place_bid("alice", 40_500, now()).unwrap();
        assert_eq!(accepted.snapshot.remaining_secs, 60);
    }

    #[test]
    fn test_tick_to_zero_closes_lot() {
        let mut session = make_session();
        let snap = session.tick(120);
        assert_eq!(snap.status, LotStatus::Closed);
        assert_eq!(snap.remaining_secs, 0);
        assert_relative_eq!(snap.progress_ratio, 1.0);

        // Further ticks are no-ops.
        let snap = session.tick(10);
        assert_eq!(snap.status, LotStatus::Closed);
    }

    #[test]
    fn test_force_close_idempotent() {
        let mut session = make_session();
        let log = MemoryEventLog::new();
        session.subscribe(Box::new(log.clone()));

        session.force_close();
        session.force_close();

        assert!(session.is_closed());
        let closes = log
            .events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Closed { .. }))
            .count();
        assert_eq!(closes, 1);
    }

    #[test]
    fn test_event_stream_for_persistence() {
        let mut session = make_session();
        let log = MemoryEventLog::new();
        session.subscribe(Box::new(log.clone()));

        session.place_bid("alice", 40_500, now()).unwrap();
        session.tick(115); // 5s left
        session.place_bid("bob", 41_000, now()).unwrap(); // triggers extension
        session.tick(30);

        let events = log.events();
        assert!(matches!(events[0], SessionEvent::Opened { .. }));
        assert!(matches!(events[1], SessionEvent::BidAccepted { .. }));
        assert!(matches!(events[2], SessionEvent::BidAccepted { .. }));
        assert!(matches!(
            events[3],
            SessionEvent::ClockExtended {
                remaining_secs: 30,
                ..
            }
        ));
        assert!(matches!(
            events[4],
            SessionEvent::Closed {
                reason: CloseReason::Expired,
                ..
            }
        ));
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_winning_flag_unique_in_history() {
        let mut session = make_session();
        session.place_bid("alice", 40_500, now()).unwrap();
        session.place_bid("bob", 41_000, now()).unwrap();
        session.place_bid("carol", 41_500, now()).unwrap();

        let winners: Vec<_> = session.history().iter().filter(|b| b.winning).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].bidder_id, "carol");
        assert_eq!(session.history().last().unwrap().bidder_id, "carol");
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = make_session();
        let mut second = AuctionSession::start(
            Lot::new("lot-2", "Marble Head", "Unknown", 10_000, 250, 60),
            &AuctionConfig::default(),
        )
        .unwrap();

        first.place_bid("alice", 40_500, now()).unwrap();
        second.tick(60);

        assert_eq!(first.snapshot().total_bid_count, 1);
        assert!(!first.is_closed());
        assert!(second.is_closed());
        assert_eq!(second.snapshot().total_bid_count, 0);
    }
}
