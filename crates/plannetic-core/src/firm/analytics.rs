use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::distribution::{asset_allocation, risk_distribution, AssetAllocation, RiskDistribution};
use super::review::{client_review_flags, risk_tier_or_default, sort_review_flags, ReviewFlag};
use crate::client::{AumCalculator, ClientRecord, ClientRecordProvider};
use crate::impact::{assess, ImpactAssessment, MacroFactor};
use crate::market::{MarketDataProvider, MarketReading};
use crate::portfolio::{decompose, PortfolioBreakdown};
use crate::types::{with_metadata, ComputationOutput, Money, Severity};
use crate::PlanneticResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of the market-impact heat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedClientImpact {
    pub client_id: String,
    pub client_name: String,
    pub initials: String,
    pub aum: Money,
    pub risk_profile: Decimal,
    pub rate_impact: Severity,
    pub inflation_impact: Severity,
    pub equity_impact: Severity,
    pub rate_details: ImpactAssessment,
    pub inflation_details: ImpactAssessment,
    pub equity_details: ImpactAssessment,
    pub portfolio: PortfolioBreakdown,
}

/// Dashboard aggregate for the whole practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmAnalytics {
    pub firm_aum: Money,
    pub client_count: usize,
    pub risk_distribution: RiskDistribution,
    pub asset_allocation: AssetAllocation,
    pub market_conditions: MarketReading,
    pub clients_needing_review: Vec<ReviewFlag>,
    pub last_updated: DateTime<Utc>,
}

/// Per-client intermediate results, computed independently.
struct ClientSnapshot {
    aum: Money,
    breakdown: PortfolioBreakdown,
    flags: Vec<ReviewFlag>,
}

// ---------------------------------------------------------------------------
// Per-client
// ---------------------------------------------------------------------------

/// Up to two initials from the client's name, upper-cased.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Decompose one client's holdings and classify all three macro factors.
pub fn assess_client(
    record: &ClientRecord,
    reading: &MarketReading,
    aum: &(impl AumCalculator + ?Sized),
) -> DetailedClientImpact {
    let portfolio = decompose(&record.profile, aum);
    let total = portfolio.total;
    let tier = risk_tier_or_default(record);

    let rate_details = assess(
        MacroFactor::InterestRate,
        portfolio.bonds,
        total,
        reading.bank_rate(),
        tier,
    );
    let inflation_details = assess(
        MacroFactor::Inflation,
        portfolio.cash,
        total,
        reading.inflation_rate(),
        tier,
    );
    let equity_details = assess(
        MacroFactor::Equity,
        portfolio.equities,
        total,
        reading.equity_change_percent(),
        tier,
    );

    DetailedClientImpact {
        client_id: record.id.clone(),
        client_name: record.name.clone(),
        initials: initials(&record.name),
        aum: total,
        risk_profile: tier,
        rate_impact: rate_details.level,
        inflation_impact: inflation_details.level,
        equity_impact: equity_details.level,
        rate_details,
        inflation_details,
        equity_details,
        portfolio,
    }
}

/// Heat-map rows for every client, in input order.
pub fn build_client_impacts(
    clients: &[ClientRecord],
    reading: &MarketReading,
    aum: &(impl AumCalculator + ?Sized),
) -> Vec<DetailedClientImpact> {
    clients
        .par_iter()
        .map(|c| assess_client(c, reading, aum))
        .collect()
}

// ---------------------------------------------------------------------------
// Firm-wide
// ---------------------------------------------------------------------------

/// Aggregate the whole client book against one market snapshot.
///
/// Per-client work fans out across the rayon pool; results are collected in
/// input order before the final ranking, so output is deterministic.
pub fn build_firm_analytics(
    clients: &[ClientRecord],
    reading: &MarketReading,
    aum: &(impl AumCalculator + ?Sized),
    as_of: DateTime<Utc>,
) -> ComputationOutput<FirmAnalytics> {
    let start = Instant::now();
    let mut warnings = reading.quality_warnings();
    for w in &warnings {
        tracing::warn!("{w}");
    }

    let snapshots: Vec<ClientSnapshot> = clients
        .par_iter()
        .map(|c| {
            let breakdown = decompose(&c.profile, aum);
            let total = breakdown.total;
            ClientSnapshot {
                aum: total,
                flags: client_review_flags(c, total, reading),
                breakdown,
            }
        })
        .collect();

    let firm_aum: Money = snapshots.iter().map(|s| s.aum).sum();
    let allocation = asset_allocation(snapshots.iter().map(|s| &s.breakdown));
    let distribution = risk_distribution(clients);

    let unreconciled = snapshots
        .iter()
        .filter(|s| s.breakdown.unreconciled() != Decimal::ZERO)
        .count();
    if unreconciled > 0 {
        warnings.push(format!(
            "{unreconciled} client(s) hold assets outside equities/bonds/cash; \
             their AUM exceeds the split used for exposure calculations"
        ));
    }
    if distribution.unassigned > 0 {
        warnings.push(format!(
            "{} client(s) have no risk assessment; tier 3 assumed for review flags",
            distribution.unassigned
        ));
    }

    let mut flags: Vec<ReviewFlag> = snapshots.into_iter().flat_map(|s| s.flags).collect();
    sort_review_flags(&mut flags);

    tracing::debug!(
        clients = clients.len(),
        flags = flags.len(),
        firm_aum = %firm_aum,
        "built firm analytics"
    );

    let output = FirmAnalytics {
        firm_aum,
        client_count: clients.len(),
        risk_distribution: distribution,
        asset_allocation: allocation,
        market_conditions: reading.clone(),
        clients_needing_review: flags,
        last_updated: as_of,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Keyword portfolio decomposition with rule-based review flags ranked by priority then AUM",
        &serde_json::json!({
            "pension_split": { "equities": "0.6", "bonds": "0.4" },
            "default_risk_tier": super::review::DEFAULT_RISK_TIER.to_string(),
        }),
        warnings,
        elapsed,
        output,
    )
}

/// Fetch the book and the market snapshot, then aggregate. Collaborator
/// errors propagate unchanged.
pub fn analyse_client_book(
    clients: &(impl ClientRecordProvider + ?Sized),
    market: &(impl MarketDataProvider + ?Sized),
    aum: &(impl AumCalculator + ?Sized),
    as_of: DateTime<Utc>,
) -> PlanneticResult<ComputationOutput<FirmAnalytics>> {
    let book = clients.list()?;
    let reading = market.fetch()?;
    Ok(build_firm_analytics(&book, &reading, aum, as_of))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{HoldingsAumCalculator, Investment};
    use rust_decimal_macros::dec;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("  mary jane watson "), "MJ");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "?");
    }

    #[test]
    fn test_assess_client_bond_heavy() {
        let record = ClientRecord {
            id: "c-1".into(),
            name: "Grace Hopper".into(),
            risk_score: Some(dec!(2)),
            profile: crate::client::ClientFinancialProfile {
                liquid_assets: dec!(10_000),
                investments: vec![
                    Investment::new("Gilt fund", dec!(60_000)),
                    Investment::new("Equity tracker", dec!(30_000)),
                ],
                ..Default::default()
            },
            ..Default::default()
        };
        let reading = MarketReading::new(dec!(7_500), dec!(-0.3), dec!(5.25), dec!(2.0));
        let row = assess_client(&record, &reading, &HoldingsAumCalculator);

        assert_eq!(row.initials, "GH");
        assert_eq!(row.aum, dec!(100_000));
        assert_eq!(row.rate_impact, Severity::High);
        assert_eq!(row.rate_details.estimated_impact, dec!(3_000));
        assert_eq!(row.inflation_impact, Severity::Low);
        assert_eq!(row.equity_impact, Severity::Low);
    }
}
