//! Demo run: the splash-page lot under a scripted bidding war.
//!
//! Replays a short auction that walks through every interesting path:
//! a refused lowball, steady bidding, and a last-seconds bid that trips
//! the anti-snipe extension. Prints the report and house metrics as JSON.

use anyhow::Result;
use bidding_core::{format_countdown, AuctionConfig, Lot};
use bidding_engine::{AuctionSession, Catalog};
use bidding_sim::{AuctionMetrics, BidScript, Simulator};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AuctionConfig::default();

    // Splash-page numbers: current bid 42,500, increment 500, 2:15 on the clock.
    let mut catalog = Catalog::new();
    catalog.add_lot(Lot::new(
        "lot-001",
        "Nocturne in Gold and Black",
        "J. Whistler",
        42_500,
        500,
        135,
    ))?;

    let lot = catalog.checkout("lot-001")?;
    info!(
        house = %config.house.site_title,
        lot_id = %lot.id,
        countdown = %format_countdown(lot.duration_secs),
        "starting demo auction"
    );

    let session = AuctionSession::start(lot, &config)?;

    let script = BidScript::new()
        .bid("bidder-017", 41_000) // below minimum, refused
        .bid("bidder-017", 43_000)
        .tick(45)
        .bid_minimum("bidder-102")
        .tick(65) // 25s left, inside the snipe window
        .bid_minimum("bidder-017") // triggers the extension
        .tick(30);

    let report = Simulator::new(session, script, Utc::now()).run();
    for event in &report.events {
        catalog.apply(event);
    }

    info!(
        hammer = report.final_snapshot.current_bid,
        bids = report.accepted,
        refused = report.rejections.len(),
        "auction finished"
    );

    let metrics =
        AuctionMetrics::from_snapshots([&report.final_snapshot], config.house.commission_rate_pct);

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("{}", serde_json::to_string_pretty(&metrics)?);

    Ok(())
}
