//! Asset-class breakdown estimated from heterogeneous client holdings.
//!
//! Investments are bucketed by keyword matching on their free-text type tag,
//! liquid assets count as cash, and pensions are split with a fixed
//! equity/bond assumption rather than being looked through.
//!
//! `total` is the external AUM figure and is deliberately not re-derived:
//! property, alternatives and unrecognised holdings count towards AUM but not
//! towards the equities/bonds/cash split used for exposure maths. Both
//! figures are kept and the gap is exposed through `unreconciled()`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::client::{AumCalculator, ClientFinancialProfile};
use crate::types::{Money, Rate};

/// Share of each pension pot treated as equities. The remainder is bonds.
pub const PENSION_EQUITY_SHARE: Rate = dec!(0.6);

/// Share of each pension pot treated as bonds.
pub const PENSION_BOND_SHARE: Rate = dec!(0.4);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Bucket an investment lands in after keyword classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBucket {
    Equities,
    Bonds,
    Cash,
    Property,
    Alternatives,
    Other,
}

/// Ephemeral breakdown of one client (or, summed, of the firm).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBreakdown {
    pub equities: Money,
    pub bonds: Money,
    pub cash: Money,
    pub property: Money,
    pub alternatives: Money,
    pub other: Money,
    /// External AUM figure, not the sum of the buckets.
    pub total: Money,
}

impl PortfolioBreakdown {
    /// Equities + bonds + cash: the part of the book the impact
    /// classifier reasons about.
    pub fn categorized_total(&self) -> Money {
        self.equities + self.bonds + self.cash
    }

    /// Gap between the AUM total and the 3-way split. Non-zero when
    /// property/alternative/other holdings exist or when the AUM
    /// calculator counts something the holdings list does not.
    pub fn unreconciled(&self) -> Money {
        self.total - self.categorized_total()
    }

    fn add(&mut self, bucket: AssetBucket, amount: Money) {
        match bucket {
            AssetBucket::Equities => self.equities += amount,
            AssetBucket::Bonds => self.bonds += amount,
            AssetBucket::Cash => self.cash += amount,
            AssetBucket::Property => self.property += amount,
            AssetBucket::Alternatives => self.alternatives += amount,
            AssetBucket::Other => self.other += amount,
        }
    }
}

impl std::ops::AddAssign<&PortfolioBreakdown> for PortfolioBreakdown {
    fn add_assign(&mut self, rhs: &PortfolioBreakdown) {
        self.equities += rhs.equities;
        self.bonds += rhs.bonds;
        self.cash += rhs.cash;
        self.property += rhs.property;
        self.alternatives += rhs.alternatives;
        self.other += rhs.other;
        self.total += rhs.total;
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Keyword groups in precedence order. First match wins.
const KEYWORDS: [(AssetBucket, &[&str]); 5] = [
    (AssetBucket::Equities, &["equity", "stock", "isa"]),
    (AssetBucket::Bonds, &["bond", "gilt"]),
    (AssetBucket::Cash, &["cash", "savings"]),
    (AssetBucket::Property, &["property", "real estate"]),
    (AssetBucket::Alternatives, &["alternative", "hedge"]),
];

/// Classify a free-text investment type tag (case-insensitive substring
/// match). A "Cash ISA" is therefore equities: the ISA keyword outranks cash.
pub fn classify_investment(type_tag: &str) -> AssetBucket {
    let tag = type_tag.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| tag.contains(w)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(AssetBucket::Other)
}

/// Estimate the asset-class breakdown of a client's holdings.
pub fn decompose(
    profile: &ClientFinancialProfile,
    aum: &(impl AumCalculator + ?Sized),
) -> PortfolioBreakdown {
    let mut breakdown = PortfolioBreakdown::default();

    for inv in &profile.investments {
        breakdown.add(classify_investment(&inv.investment_type), inv.current_value);
    }

    breakdown.cash += profile.liquid_assets;

    for pension in &profile.pensions {
        breakdown.equities += pension.current_value * PENSION_EQUITY_SHARE;
        breakdown.bonds += pension.current_value * PENSION_BOND_SHARE;
    }

    breakdown.total = aum.compute(profile).total_aum;

    if breakdown.unreconciled() != Decimal::ZERO {
        tracing::debug!(
            total = %breakdown.total,
            categorized = %breakdown.categorized_total(),
            "portfolio total diverges from equities/bonds/cash split"
        );
    }

    breakdown
}
