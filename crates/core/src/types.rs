//! Core data types for the bidding engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monetary amount in whole currency units (no minor units).
pub type Amount = u64;

/// Duration or remaining time in whole seconds.
pub type Seconds = u32;

/// Lot identifier, owned by the catalog.
pub type LotId = String;

/// Opaque bidder identifier supplied by an external identity provider.
pub type BidderId = String;

/// Per-ledger bid sequence number.
pub type BidId = u64;

/// Format a number of seconds as an `HH:MM:SS` countdown string.
pub fn format_countdown(secs: Seconds) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Lifecycle status of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotStatus {
    /// Created but not yet started.
    Scheduled,
    /// Under the hammer.
    Live,
    /// Bidding finished.
    Closed,
}

/// A single item up for auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    /// Catalog identifier.
    pub id: LotId,
    /// Title of the work.
    pub title: String,
    /// Artist or maker.
    pub artist: String,
    /// Opening price (whole units, must be positive).
    pub starting_price: Amount,
    /// Minimum bid increment (whole units, must be positive).
    pub increment: Amount,
    /// Auction duration in seconds (must be positive).
    pub duration_secs: Seconds,
    /// Lifecycle status.
    pub status: LotStatus,
    /// Low estimate, if published.
    pub estimate_min: Option<Amount>,
    /// High estimate, if published.
    pub estimate_max: Option<Amount>,
}

impl Lot {
    /// Create a scheduled lot with no estimates.
    pub fn new(
        id: impl Into<LotId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        starting_price: Amount,
        increment: Amount,
        duration_secs: Seconds,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            starting_price,
            increment,
            duration_secs,
            status: LotStatus::Scheduled,
            estimate_min: None,
            estimate_max: None,
        }
    }

    /// Validate the fields a session depends on. Checked once at start.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::lot("title must not be empty"));
        }
        if self.starting_price == 0 {
            return Err(crate::Error::lot("starting price must be positive"));
        }
        if self.increment == 0 {
            return Err(crate::Error::lot("increment must be positive"));
        }
        if self.duration_secs == 0 {
            return Err(crate::Error::lot("duration must be positive"));
        }
        Ok(())
    }
}

/// An accepted bid. Immutable once recorded, except for the winning flag
/// which flips to false when a later bid is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Sequence number within the lot's ledger.
    pub id: BidId,
    /// Lot this bid was placed on.
    pub lot_id: LotId,
    /// Who placed it.
    pub bidder_id: BidderId,
    /// Bid amount (whole units).
    pub amount: Amount,
    /// When the bid was accepted (caller-supplied wall clock).
    pub placed_at: DateTime<Utc>,
    /// Whether this is the current winning bid.
    pub winning: bool,
}

/// Read-only view of a running (or finished) session, suitable for any
/// presentation layer. Carries no references into session internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Lot under the hammer.
    pub lot_id: LotId,
    /// Current winning bid amount, or the starting price if no bids.
    pub current_bid: Amount,
    /// Minimum amount the next bid must reach.
    pub next_minimum_bid: Amount,
    /// Remaining time in seconds.
    pub remaining_secs: Seconds,
    /// Elapsed fraction of the lot duration, in [0, 1].
    pub progress_ratio: f64,
    /// Number of accepted bids so far.
    pub total_bid_count: usize,
    /// Lot status as seen by the session.
    pub status: LotStatus,
}

/// Result of a successful `place_bid`: the accepted bid plus the state the
/// session was left in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidAccepted {
    /// The bid as recorded in the ledger.
    pub bid: Bid,
    /// Session state immediately after acceptance (and any extension).
    pub snapshot: SessionSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(135), "00:02:15");
        assert_eq!(format_countdown(3661), "01:01:01");
    }

    #[test]
    fn test_lot_validate() {
        let lot = Lot::new("lot-1", "Nocturne", "A. Painter", 40_000, 500, 120);
        assert!(lot.validate().is_ok());

        let mut bad = lot.clone();
        bad.starting_price = 0;
        assert!(bad.validate().is_err());

        let mut bad = lot.clone();
        bad.increment = 0;
        assert!(bad.validate().is_err());

        let mut bad = lot;
        bad.duration_secs = 0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_lot_starts_scheduled() {
        let lot = Lot::new("lot-1", "Nocturne", "A. Painter", 40_000, 500, 120);
        assert_eq!(lot.status, LotStatus::Scheduled);
        assert!(lot.estimate_min.is_none());
    }
}
