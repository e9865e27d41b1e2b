use serde::{Deserialize, Serialize};

use super::profile::ClientFinancialProfile;
use crate::types::Money;

/// Assets-under-management figure for one client, split by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AumSummary {
    pub total_aum: Money,
    pub investments: Money,
    pub pensions: Money,
    pub liquid_assets: Money,
}

/// Source of the AUM figure used as `PortfolioBreakdown::total` and for
/// ranking review flags. Callers must use one calculator consistently
/// across a single analytics pass.
pub trait AumCalculator: Sync {
    fn compute(&self, profile: &ClientFinancialProfile) -> AumSummary;
}

/// Default calculator: every recorded holding counts towards AUM,
/// including property and alternatives that the 3-way breakdown drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldingsAumCalculator;

impl AumCalculator for HoldingsAumCalculator {
    fn compute(&self, profile: &ClientFinancialProfile) -> AumSummary {
        let investments = profile.investment_value();
        let pensions = profile.pension_value();
        let liquid_assets = profile.liquid_assets;
        AumSummary {
            total_aum: investments + pensions + liquid_assets,
            investments,
            pensions,
            liquid_assets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::profile::{Investment, Pension};
    use rust_decimal_macros::dec;

    #[test]
    fn test_holdings_aum_sums_every_source() {
        let profile = ClientFinancialProfile {
            liquid_assets: dec!(10_000),
            investments: vec![
                Investment::new("ISA", dec!(50_000)),
                Investment::new("Buy-to-let property", dec!(200_000)),
            ],
            pensions: vec![Pension {
                current_value: dec!(100_000),
                monthly_contribution: dec!(500),
            }],
            ..Default::default()
        };
        let aum = HoldingsAumCalculator.compute(&profile);
        assert_eq!(aum.investments, dec!(250_000));
        assert_eq!(aum.pensions, dec!(100_000));
        assert_eq!(aum.liquid_assets, dec!(10_000));
        assert_eq!(aum.total_aum, dec!(360_000));
    }

    #[test]
    fn test_empty_profile_has_zero_aum() {
        let aum = HoldingsAumCalculator.compute(&ClientFinancialProfile::default());
        assert_eq!(aum, AumSummary::default());
    }
}
