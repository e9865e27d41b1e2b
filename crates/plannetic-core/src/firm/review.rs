use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::client::{AumCalculator, ClientRecord};
use crate::market::MarketReading;
use crate::types::{Money, Severity};

/// Tier assumed for clients without a completed risk assessment.
pub const DEFAULT_RISK_TIER: Decimal = dec!(3);

pub fn risk_tier_or_default(record: &ClientRecord) -> Decimal {
    record.risk_score.unwrap_or(DEFAULT_RISK_TIER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewTrigger {
    /// Conservative client holding value while inflation runs hot.
    InflationRisk,
    /// Growth client who could lock in high fixed income yields.
    RateOpportunity,
    /// Conservative client during a large index move.
    EquityVolatility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFlag {
    pub client_id: String,
    pub client_name: String,
    pub risk_profile: Decimal,
    pub trigger: ReviewTrigger,
    pub reason: String,
    pub priority: Severity,
    pub aum: Money,
}

/// Flags raised for one client. Rules are independent, so a client can
/// collect several.
pub fn client_review_flags(
    record: &ClientRecord,
    aum: Money,
    reading: &MarketReading,
) -> Vec<ReviewFlag> {
    let tier = risk_tier_or_default(record);
    let inflation = reading.inflation_rate();
    let bank_rate = reading.bank_rate();
    let change = reading.equity_change_percent();

    let flag = |trigger, priority, reason: String| ReviewFlag {
        client_id: record.id.clone(),
        client_name: record.name.clone(),
        risk_profile: tier,
        trigger,
        reason,
        priority,
        aum,
    };

    let mut flags = Vec::new();

    if inflation > dec!(3) && tier <= dec!(2) {
        flags.push(flag(
            ReviewTrigger::InflationRisk,
            Severity::High,
            format!(
                "Inflation at {}% may be eroding the real value of a conservative portfolio",
                inflation.normalize()
            ),
        ));
    }

    if bank_rate > dec!(5) && tier >= dec!(4) {
        flags.push(flag(
            ReviewTrigger::RateOpportunity,
            Severity::Medium,
            format!(
                "Bank Rate at {}% offers a fixed income opportunity for a growth-oriented client",
                bank_rate.normalize()
            ),
        ));
    }

    if change.abs() > dec!(2) && tier <= dec!(2) {
        let priority = if change < dec!(-2) {
            Severity::High
        } else {
            Severity::Low
        };
        flags.push(flag(
            ReviewTrigger::EquityVolatility,
            priority,
            format!(
                "FTSE 100 moved {}% today; check a conservative client is comfortable with the volatility",
                change.normalize()
            ),
        ));
    }

    flags
}

/// Most urgent first, then largest AUM. Stable, so equal keys keep
/// their input order.
pub fn sort_review_flags(flags: &mut [ReviewFlag]) {
    flags.sort_by(|a, b| a.priority.cmp(&b.priority).then(b.aum.cmp(&a.aum)));
}

/// Review flags across the whole client book, ranked.
pub fn build_review_flags(
    clients: &[ClientRecord],
    reading: &MarketReading,
    aum: &(impl AumCalculator + ?Sized),
) -> Vec<ReviewFlag> {
    let mut flags: Vec<ReviewFlag> = clients
        .iter()
        .flat_map(|c| client_review_flags(c, aum.compute(&c.profile).total_aum, reading))
        .collect();
    sort_review_flags(&mut flags);
    flags
}
