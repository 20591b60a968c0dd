//! House-level metrics over finished sessions.
//!
//! Hammer totals, commission, and sell-through, computed from session
//! snapshots after the fact. Nothing here feeds back into bid acceptance.

use bidding_core::{Amount, LotStatus, SessionSnapshot};
use serde::{Deserialize, Serialize};

/// Aggregate results for a set of lots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionMetrics {
    /// Lots included.
    pub lots_offered: usize,
    /// Closed lots that received at least one bid.
    pub lots_sold: usize,
    /// Sum of winning bid amounts over sold lots.
    pub total_hammer: Amount,
    /// House commission on the hammer total.
    pub total_commission: f64,
    /// Accepted bids across all lots.
    pub total_bids: usize,
    /// `lots_sold / lots_offered`, or 0 when nothing was offered.
    pub sell_through_rate: f64,
}

impl AuctionMetrics {
    /// Compute metrics over per-lot snapshots at the house commission rate
    /// (percent of hammer). Snapshots normally come from
    /// [`AuctionSession::snapshot`](bidding_engine::AuctionSession::snapshot)
    /// or a [`SimReport`](crate::SimReport)'s `final_snapshot`.
    pub fn from_snapshots<'a>(
        snapshots: impl IntoIterator<Item = &'a SessionSnapshot>,
        commission_rate_pct: f64,
    ) -> Self {
        let mut lots_offered = 0;
        let mut lots_sold = 0;
        let mut total_hammer: Amount = 0;
        let mut total_bids = 0;

        for snapshot in snapshots {
            lots_offered += 1;
            total_bids += snapshot.total_bid_count;
            if snapshot.status == LotStatus::Closed && snapshot.total_bid_count > 0 {
                lots_sold += 1;
                total_hammer += snapshot.current_bid;
            }
        }

        let sell_through_rate = if lots_offered > 0 {
            lots_sold as f64 / lots_offered as f64
        } else {
            0.0
        };

        Self {
            lots_offered,
            lots_sold,
            total_hammer,
            total_commission: total_hammer as f64 * commission_rate_pct / 100.0,
            total_bids,
            sell_through_rate,
        }
    }
}
