use chrono::{NaiveDate, Utc};
use clap::Args;
use serde_json::Value;

use plannetic_core::cashflow::{derive_scenario_parameters, ScenarioAssumptions, ScenarioInput};
use plannetic_core::client::ClientRecord;

use crate::input;

/// Arguments for cash-flow scenario derivation
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON client record (stdin if omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Assumptions override file (JSON or YAML)
    #[arg(long)]
    pub assumptions: Option<String>,

    /// Reference date for age calculation (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let record: ClientRecord = input::stdin::read_input(args.input.as_deref(), "scenario derivation")?;
    let assumptions: ScenarioAssumptions = match args.assumptions {
        Some(ref path) => input::file::read_config(path)?,
        None => ScenarioAssumptions::default(),
    };
    assumptions.validate()?;

    let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let scenario = ScenarioInput::from_record(&record, as_of);
    let result = derive_scenario_parameters(&scenario, &assumptions);
    Ok(serde_json::to_value(result)?)
}
