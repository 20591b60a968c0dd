//! Error types for the bidding engine.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the bidding engine.
///
/// These are construction/boundary errors. Bid rejections during a live
/// auction use [`BidError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lot validation error (bad price, increment, or duration).
    #[error("Lot error: {0}")]
    Lot(String),

    /// Catalog error (unknown or duplicate lot).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a lot validation error.
    pub fn lot(msg: impl Into<String>) -> Self {
        Error::Lot(msg.into())
    }

    /// Create a catalog error.
    pub fn catalog(msg: impl Into<String>) -> Self {
        Error::Catalog(msg.into())
    }
}

/// Rejection reasons for a submitted bid.
///
/// All of these are recoverable: the caller surfaces them to the bidder and
/// the session stays live. The engine never panics for an expected rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    /// Bid amount is not a positive whole unit.
    #[error("bid amount must be a positive whole amount")]
    InvalidAmount,

    /// Bid amount is below the current required minimum.
    #[error("bid is below the minimum of {minimum}")]
    BelowMinimum {
        /// The minimum that was in force when the bid was rejected.
        minimum: crate::types::Amount,
    },

    /// Bid arrived after the clock reached zero.
    #[error("auction is closed")]
    AuctionClosed,
}
