//! Scripted bidder activity.
//!
//! A script is an ordered list of actions replayed against one session.
//! Scripts replace the randomized "simulated bidder" behavior of a live
//! demo with something a test can assert on exactly.

use bidding_core::{Amount, BidderId, Seconds};
use serde::{Deserialize, Serialize};

/// How a scripted bid picks its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidAmount {
    /// Bid a fixed amount.
    Exact(Amount),
    /// Bid whatever the session's next minimum is at that moment.
    NextMinimum,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptAction {
    /// Advance the session clock.
    Tick(Seconds),
    /// Place a bid.
    Bid {
        /// Who bids.
        bidder: BidderId,
        /// How much.
        amount: BidAmount,
    },
}

/// An ordered sequence of actions for one lot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidScript {
    actions: Vec<ScriptAction>,
}

impl BidScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clock advance of `secs` seconds.
    pub fn tick(mut self, secs: Seconds) -> Self {
        self.actions.push(ScriptAction::Tick(secs));
        self
    }

    /// Append a bid at an exact amount.
    pub fn bid(mut self, bidder: impl Into<BidderId>, amount: Amount) -> Self {
        self.actions.push(ScriptAction::Bid {
            bidder: bidder.into(),
            amount: BidAmount::Exact(amount),
        });
        self
    }

    /// Append a bid at the next minimum in force when the action runs.
    pub fn bid_minimum(mut self, bidder: impl Into<BidderId>) -> Self {
        self.actions.push(ScriptAction::Bid {
            bidder: bidder.into(),
            amount: BidAmount::NextMinimum,
        });
        self
    }

    /// The scripted actions, in order.
    pub fn actions(&self) -> &[ScriptAction] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the script has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
