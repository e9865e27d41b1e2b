use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::Value;

use plannetic_core::client::{ClientRecordProvider, HoldingsAumCalculator};
use plannetic_core::firm::{analyse_client_book, build_client_impacts, build_review_flags};
use plannetic_core::market::MarketDataProvider;

use crate::input::providers::{JsonClientBook, JsonMarketFeed};

/// Arguments shared by the firm-wide commands
#[derive(Args)]
pub struct BookArgs {
    /// Path to JSON array of client records
    #[arg(long)]
    pub clients: String,

    /// Path to JSON market reading
    #[arg(long)]
    pub market: String,
}

/// Arguments for the firm analytics dashboard
#[derive(Args)]
pub struct FirmAnalyticsArgs {
    #[command(flatten)]
    pub book: BookArgs,

    /// Timestamp to stamp the result with (RFC 3339, defaults to now)
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,
}

pub fn run_firm_analytics(args: FirmAnalyticsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let clients = JsonClientBook::new(args.book.clients);
    let market = JsonMarketFeed::new(args.book.market);
    let as_of = args.as_of.unwrap_or_else(Utc::now);
    let result = analyse_client_book(&clients, &market, &HoldingsAumCalculator, as_of)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_review_flags(args: BookArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let clients = JsonClientBook::new(args.clients).list()?;
    let reading = JsonMarketFeed::new(args.market).fetch()?;
    let flags = build_review_flags(&clients, &reading, &HoldingsAumCalculator);
    Ok(serde_json::to_value(flags)?)
}

pub fn run_heatmap(args: BookArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let clients = JsonClientBook::new(args.clients).list()?;
    let reading = JsonMarketFeed::new(args.market).fetch()?;
    let rows = build_client_impacts(&clients, &reading, &HoldingsAumCalculator);
    Ok(serde_json::to_value(rows)?)
}
