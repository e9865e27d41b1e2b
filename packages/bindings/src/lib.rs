use chrono::{DateTime, Utc};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use plannetic_core::cashflow::{derive_scenario_parameters, ScenarioAssumptions, ScenarioInput};
use plannetic_core::client::{ClientFinancialProfile, ClientRecord, HoldingsAumCalculator};
use plannetic_core::firm::{build_client_impacts, build_firm_analytics, build_review_flags};
use plannetic_core::market::MarketReading;
use plannetic_core::portfolio::decompose;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn decompose_portfolio(profile_json: String) -> NapiResult<String> {
    let profile: ClientFinancialProfile =
        serde_json::from_str(&profile_json).map_err(to_napi_error)?;
    let breakdown = decompose(&profile, &HoldingsAumCalculator);
    serde_json::to_string(&breakdown).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Firm analytics
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FirmRequest {
    clients: Vec<ClientRecord>,
    market: MarketReading,
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

fn parse_firm_request(json: &str) -> NapiResult<FirmRequest> {
    serde_json::from_str(json).map_err(to_napi_error)
}

#[napi]
pub fn firm_analytics(request_json: String) -> NapiResult<String> {
    let req = parse_firm_request(&request_json)?;
    let as_of = req.as_of.unwrap_or_else(Utc::now);
    let output = build_firm_analytics(&req.clients, &req.market, &HoldingsAumCalculator, as_of);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn review_flags(request_json: String) -> NapiResult<String> {
    let req = parse_firm_request(&request_json)?;
    let flags = build_review_flags(&req.clients, &req.market, &HoldingsAumCalculator);
    serde_json::to_string(&flags).map_err(to_napi_error)
}

#[napi]
pub fn client_impacts(request_json: String) -> NapiResult<String> {
    let req = parse_firm_request(&request_json)?;
    let rows = build_client_impacts(&req.clients, &req.market, &HoldingsAumCalculator);
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cash-flow scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn scenario_parameters(
    input_json: String,
    assumptions_json: Option<String>,
) -> NapiResult<String> {
    let input: ScenarioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let assumptions: ScenarioAssumptions = match assumptions_json {
        Some(ref json) => serde_json::from_str(json).map_err(to_napi_error)?,
        None => ScenarioAssumptions::default(),
    };
    assumptions.validate().map_err(to_napi_error)?;
    let output = derive_scenario_parameters(&input, &assumptions);
    serde_json::to_string(&output).map_err(to_napi_error)
}
