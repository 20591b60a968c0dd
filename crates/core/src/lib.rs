//! Core types and configuration for the bidding engine.
//!
//! This crate provides shared types used across all other crates:
//! - Auction data types (lots, bids, snapshots)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::AuctionConfig;
pub use error::{BidError, Error, Result};
pub use types::*;
