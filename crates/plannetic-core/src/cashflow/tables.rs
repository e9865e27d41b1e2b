//! Risk-score lookup tables. Immutable, indexed by `score - 1`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

pub const MIN_RISK_SCORE: u8 = 1;
pub const MAX_RISK_SCORE: u8 = 10;

/// Real (inflation-adjusted) annual returns in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealReturns {
    pub equity: Percent,
    pub bond: Percent,
    pub cash: Percent,
}

/// Target allocation in whole percent. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAllocation {
    pub equity: Percent,
    pub bond: Percent,
    pub cash: Percent,
}

static REAL_RETURNS: [RealReturns; 10] = [
    RealReturns { equity: dec!(1.5), bond: dec!(0.5), cash: dec!(0) },
    RealReturns { equity: dec!(2.0), bond: dec!(0.5), cash: dec!(0) },
    RealReturns { equity: dec!(2.5), bond: dec!(0.75), cash: dec!(0) },
    RealReturns { equity: dec!(3.0), bond: dec!(1.0), cash: dec!(0) },
    RealReturns { equity: dec!(3.5), bond: dec!(1.0), cash: dec!(0) },
    RealReturns { equity: dec!(4.0), bond: dec!(1.25), cash: dec!(0) },
    RealReturns { equity: dec!(4.5), bond: dec!(1.5), cash: dec!(0) },
    RealReturns { equity: dec!(5.0), bond: dec!(1.75), cash: dec!(0) },
    RealReturns { equity: dec!(5.5), bond: dec!(2.0), cash: dec!(0) },
    RealReturns { equity: dec!(6.0), bond: dec!(2.0), cash: dec!(0) },
];

static EQUITY_ALLOCATION: [u8; 10] = [20, 30, 40, 50, 60, 70, 80, 85, 90, 95];

fn cash_allocation(score: u8) -> u8 {
    match score {
        0..=3 => 20,
        4..=6 => 10,
        _ => 5,
    }
}

/// Round a raw score half-up to an integer and clamp it into 1..=10.
/// Missing scores take `default_score`, which is clamped the same way.
pub fn resolve_risk_score(raw: Option<Decimal>, default_score: u8) -> u8 {
    let default_score = default_score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE);
    let Some(raw) = raw else {
        return default_score;
    };
    let clamped = raw
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::from(MIN_RISK_SCORE))
        .min(Decimal::from(MAX_RISK_SCORE));
    clamped.to_u8().unwrap_or(default_score)
}

fn index(score: u8) -> usize {
    (score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE) - 1) as usize
}

pub fn returns_for(score: u8) -> RealReturns {
    REAL_RETURNS[index(score)]
}

pub fn allocation_for(score: u8) -> TargetAllocation {
    let score = score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE);
    let equity = EQUITY_ALLOCATION[index(score)];
    let cash = cash_allocation(score);
    let bond = 100u8.saturating_sub(equity).saturating_sub(cash);
    TargetAllocation {
        equity: Decimal::from(equity),
        bond: Decimal::from(bond),
        cash: Decimal::from(cash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_risk_score_clamps() {
        assert_eq!(resolve_risk_score(Some(dec!(0)), 5), 1);
        assert_eq!(resolve_risk_score(Some(dec!(11)), 5), 10);
        assert_eq!(resolve_risk_score(Some(dec!(-5)), 5), 1);
        assert_eq!(resolve_risk_score(Some(dec!(7)), 5), 7);
        assert_eq!(resolve_risk_score(None, 5), 5);
    }

    #[test]
    fn test_resolve_risk_score_rounds_fractions() {
        assert_eq!(resolve_risk_score(Some(dec!(6.4)), 5), 6);
        assert_eq!(resolve_risk_score(Some(dec!(6.5)), 5), 7);
        assert_eq!(resolve_risk_score(Some(dec!(6.6)), 5), 7);
        assert_eq!(resolve_risk_score(Some(dec!(10.0)), 5), 10);
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(returns_for(1).equity, dec!(1.5));
        assert_eq!(returns_for(10).equity, dec!(6.0));
        assert_eq!(returns_for(10).bond, dec!(2.0));

        let a = allocation_for(8);
        assert_eq!(a.equity, dec!(85));
        assert_eq!(a.bond, dec!(10));
        assert_eq!(a.cash, dec!(5));

        let a = allocation_for(1);
        assert_eq!((a.equity, a.bond, a.cash), (dec!(20), dec!(60), dec!(20)));

        let a = allocation_for(10);
        assert_eq!((a.equity, a.bond, a.cash), (dec!(95), dec!(0), dec!(5)));
    }
}
