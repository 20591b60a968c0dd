//! Append-only bid history for one lot.
//!
//! The ledger owns the ordered sequence of accepted bids, tracks the current
//! winning bid, and enforces the minimum-increment rule. It performs no I/O.

use bidding_core::{Amount, Bid, BidError, BidderId, LotId};
use chrono::{DateTime, Utc};

/// Ordered bid history for a single lot, newest-last.
#[derive(Debug, Clone)]
pub struct BidLedger {
    lot_id: LotId,
    starting_price: Amount,
    increment: Amount,
    bids: Vec<Bid>,
    next_bid_id: u64,
}

impl BidLedger {
    /// Create an empty ledger seeded at the lot's starting price.
    pub fn new(lot_id: impl Into<LotId>, starting_price: Amount, increment: Amount) -> Self {
        Self {
            lot_id: lot_id.into(),
            starting_price,
            increment,
            bids: Vec::new(),
            next_bid_id: 1,
        }
    }

    /// Current winning bid amount, or the starting price if no bids exist.
    pub fn current_bid(&self) -> Amount {
        self.bids
            .last()
            .map(|bid| bid.amount)
            .unwrap_or(self.starting_price)
    }

    /// Minimum amount the next bid must reach: `current_bid + increment`.
    pub fn next_minimum_bid(&self) -> Amount {
        self.current_bid() + self.increment
    }

    /// The bid increment in force for this lot.
    pub fn increment(&self) -> Amount {
        self.increment
    }

    /// Validate and record a bid.
    ///
    /// A bid exactly equal to [`next_minimum_bid`](Self::next_minimum_bid) is
    /// the minimum legal bid and succeeds. On acceptance the previous winning
    /// bid (if any) loses its winning flag in the same call.
    pub fn submit_bid(
        &mut self,
        bidder_id: impl Into<BidderId>,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Bid, BidError> {
        if amount == 0 {
            return Err(BidError::InvalidAmount);
        }
        let minimum = self.next_minimum_bid();
        if amount < minimum {
            return Err(BidError::BelowMinimum { minimum });
        }

        if let Some(previous) = self.bids.last_mut() {
            previous.winning = false;
        }

        let bid = Bid {
            id: self.next_bid_id,
            lot_id: self.lot_id.clone(),
            bidder_id: bidder_id.into(),
            amount,
            placed_at: now,
            winning: true,
        };
        self.next_bid_id += 1;
        self.bids.push(bid.clone());
        Ok(bid)
    }

    /// Full history in acceptance order, newest-last. Callers wanting a
    /// newest-first display order must sort on their side.
    pub fn history(&self) -> &[Bid] {
        &self.bids
    }

    /// The current winning bid, if any bid has been accepted.
    pub fn winning_bid(&self) -> Option<&Bid> {
        self.bids.last()
    }

    /// Number of accepted bids.
    pub fn total_bid_count(&self) -> usize {
        self.bids.len()
    }
}
