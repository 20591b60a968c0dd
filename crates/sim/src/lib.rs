//! Deterministic simulation harness for the bidding engine.
//!
//! This crate provides:
//! - Scripted bidder activity (no randomness, fully replayable)
//! - A harness that drives a session tick-by-tick and records everything
//! - House-level metrics over finished sessions

pub mod harness;
pub mod metrics;
pub mod script;

pub use harness::{SimReport, Simulator};
pub use metrics::AuctionMetrics;
pub use script::{BidAmount, BidScript, ScriptAction};
