use clap::Args;
use serde_json::Value;

use plannetic_core::client::{ClientRecord, HoldingsAumCalculator};
use plannetic_core::firm::assess_client;
use plannetic_core::market::MarketDataProvider;
use plannetic_core::portfolio::decompose;

use crate::input;
use crate::input::providers::JsonMarketFeed;

/// Arguments for portfolio decomposition
#[derive(Args)]
pub struct DecomposeArgs {
    /// Path to JSON client record (stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for single-client market impact
#[derive(Args)]
pub struct ImpactArgs {
    /// Path to JSON client record (stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to JSON market reading
    #[arg(long)]
    pub market: String,
}

pub fn run_decompose(args: DecomposeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: ClientRecord = input::stdin::read_input(args.input.as_deref(), "decomposition")?;
    let breakdown = decompose(&record.profile, &HoldingsAumCalculator);
    let mut value = serde_json::to_value(&breakdown)?;
    if let Value::Object(ref mut map) = value {
        map.insert(
            "categorized_total".into(),
            serde_json::to_value(breakdown.categorized_total())?,
        );
        map.insert(
            "unreconciled".into(),
            serde_json::to_value(breakdown.unreconciled())?,
        );
    }
    Ok(value)
}

pub fn run_impact(args: ImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: ClientRecord = input::stdin::read_input(args.input.as_deref(), "impact analysis")?;
    let reading = JsonMarketFeed::new(args.market).fetch()?;
    let row = assess_client(&record, &reading, &HoldingsAumCalculator);
    Ok(serde_json::to_value(row)?)
}
