//! Market-impact classification per macro factor.
//!
//! Each factor pairs one slice of the portfolio with one market figure:
//! bonds with Bank Rate, cash with inflation, equities with the FTSE 100
//! daily move. The arithmetic and the severity decision live here and
//! produce an [`ImpactFinding`]; prose is attached afterwards by
//! [`super::narrative`], so each can be tested on its own.
//!
//! Every function is total. A zero (or negative) AUM yields zero exposure.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::narrative;
use crate::types::{Money, Percent, Rate, Severity};

/// Fixed modified duration used for the linear bond sensitivity estimate.
pub const ASSUMED_BOND_DURATION: Decimal = dec!(5);

/// Size of the parallel rate shock, as a decimal (1%).
pub const RATE_SHOCK: Rate = dec!(0.01);

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroFactor {
    /// Bond holdings against Bank Rate.
    InterestRate,
    /// Cash holdings against CPI inflation.
    Inflation,
    /// Equity holdings against the FTSE 100 daily move.
    Equity,
}

/// Outcome of the arithmetic for one (client, factor) pair, before any
/// text is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactFinding {
    pub factor: MacroFactor,
    pub level: Severity,
    /// Share of AUM exposed to the factor, as a decimal.
    pub exposure: Rate,
    /// Monetary sensitivity estimate. Rate and equity figures are
    /// magnitudes; the inflation figure is negative under deflation.
    pub estimated_impact: Money,
    /// The market figure the finding was computed against.
    pub factor_value: Percent,
}

impl ImpactFinding {
    pub fn exposure_percent(&self) -> Percent {
        (self.exposure * HUNDRED).round_dp(2)
    }
}

/// Classified impact with adviser-facing explanation and recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub level: Severity,
    pub exposure: Rate,
    pub exposure_percent: Percent,
    pub estimated_impact: Money,
    pub explanation: String,
    pub recommendation: String,
}

impl From<ImpactFinding> for ImpactAssessment {
    fn from(finding: ImpactFinding) -> Self {
        let text = narrative::describe(&finding);
        ImpactAssessment {
            level: finding.level,
            exposure: finding.exposure,
            exposure_percent: finding.exposure_percent(),
            estimated_impact: finding.estimated_impact,
            explanation: text.explanation,
            recommendation: text.recommendation,
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// `value / total`, or zero when there is nothing to divide by.
pub fn exposure_ratio(value: Money, total_aum: Money) -> Rate {
    if total_aum <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        value / total_aum
    }
}

/// Bonds vs Bank Rate. Impact is a 1% parallel shock at a fixed 5-year
/// duration: `|D × 0.01 × bonds|`.
pub fn classify_rate(bond_value: Money, total_aum: Money, bank_rate: Percent) -> ImpactFinding {
    let exposure = exposure_ratio(bond_value, total_aum);
    let estimated_impact = (ASSUMED_BOND_DURATION * RATE_SHOCK * bond_value).abs();

    let level = if exposure > dec!(0.5) && bank_rate > dec!(4) {
        Severity::High
    } else if exposure > dec!(0.3) || (exposure > dec!(0.2) && bank_rate > dec!(4.5)) {
        Severity::Medium
    } else {
        Severity::Low
    };

    ImpactFinding {
        factor: MacroFactor::InterestRate,
        level,
        exposure,
        estimated_impact,
        factor_value: bank_rate,
    }
}

/// Cash vs inflation. Impact is one year of real-value erosion, negative
/// when prices are falling.
pub fn classify_inflation(
    cash_value: Money,
    total_aum: Money,
    inflation_rate: Percent,
) -> ImpactFinding {
    let exposure = exposure_ratio(cash_value, total_aum);
    let estimated_impact = cash_value * (inflation_rate / HUNDRED);

    let level = if exposure > dec!(0.3) && inflation_rate > dec!(2.5) {
        Severity::High
    } else if exposure > dec!(0.2) || (exposure > dec!(0.15) && inflation_rate > dec!(3)) {
        Severity::Medium
    } else {
        Severity::Low
    };

    ImpactFinding {
        factor: MacroFactor::Inflation,
        level,
        exposure,
        estimated_impact,
        factor_value: inflation_rate,
    }
}

/// Equities vs the index move. Only conservative clients (risk tier 2 or
/// below) can reach `High`.
pub fn classify_equity(
    equity_value: Money,
    total_aum: Money,
    change_percent: Percent,
    risk_tier: Decimal,
) -> ImpactFinding {
    let exposure = exposure_ratio(equity_value, total_aum);
    let estimated_impact = (equity_value * (change_percent / HUNDRED)).abs();

    let move_size = change_percent.abs();
    let is_volatile = move_size > Decimal::ONE;
    let is_conservative = risk_tier <= dec!(2);

    let level = if exposure > dec!(0.6) && is_volatile && is_conservative {
        Severity::High
    } else if (exposure > dec!(0.5) && is_volatile) || (exposure > dec!(0.7) && move_size > dec!(0.5))
    {
        Severity::Medium
    } else {
        Severity::Low
    };

    ImpactFinding {
        factor: MacroFactor::Equity,
        level,
        exposure,
        estimated_impact,
        factor_value: change_percent,
    }
}

/// Dispatch on factor with the shared `(exposure value, AUM, market
/// figure, risk tier)` shape. Risk tier only matters for equities.
pub fn classify(
    factor: MacroFactor,
    exposure_value: Money,
    total_aum: Money,
    factor_value: Percent,
    risk_tier: Decimal,
) -> ImpactFinding {
    match factor {
        MacroFactor::InterestRate => classify_rate(exposure_value, total_aum, factor_value),
        MacroFactor::Inflation => classify_inflation(exposure_value, total_aum, factor_value),
        MacroFactor::Equity => classify_equity(exposure_value, total_aum, factor_value, risk_tier),
    }
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

pub fn assess(
    factor: MacroFactor,
    exposure_value: Money,
    total_aum: Money,
    factor_value: Percent,
    risk_tier: Decimal,
) -> ImpactAssessment {
    classify(factor, exposure_value, total_aum, factor_value, risk_tier).into()
}

pub fn assess_rate_impact(bond_value: Money, total_aum: Money, bank_rate: Percent) -> ImpactAssessment {
    classify_rate(bond_value, total_aum, bank_rate).into()
}

pub fn assess_inflation_impact(
    cash_value: Money,
    total_aum: Money,
    inflation_rate: Percent,
) -> ImpactAssessment {
    classify_inflation(cash_value, total_aum, inflation_rate).into()
}

pub fn assess_equity_impact(
    equity_value: Money,
    total_aum: Money,
    change_percent: Percent,
    risk_tier: Decimal,
) -> ImpactAssessment {
    classify_equity(equity_value, total_aum, change_percent, risk_tier).into()
}
