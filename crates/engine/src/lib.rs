//! Live bidding engine.
//!
//! This crate provides:
//! - Append-only bid ledger with minimum-increment enforcement
//! - Countdown clock with anti-snipe extension
//! - Auction session composing one lot, one ledger, one clock
//! - Session events for external persistence adapters
//! - In-memory lot catalog

pub mod catalog;
pub mod clock;
pub mod event;
pub mod ledger;
pub mod session;

pub use catalog::Catalog;
pub use clock::{AuctionClock, ClockState};
pub use event::{CloseReason, EventSink, MemoryEventLog, SessionEvent};
pub use ledger::BidLedger;
pub use session::AuctionSession;
