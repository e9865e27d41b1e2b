use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::client::ClientRecord;
use crate::portfolio::PortfolioBreakdown;
use crate::types::Money;

/// Client counts per risk band. Scores are banded by upper threshold, so
/// fractional assessment scores land in the band at or above them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub tier_1: u32,
    pub tier_2: u32,
    pub tier_3: u32,
    pub tier_4: u32,
    pub tier_5: u32,
    pub unassigned: u32,
}

impl RiskDistribution {
    pub fn record(&mut self, risk_score: Option<Decimal>) {
        match risk_score {
            None => self.unassigned += 1,
            Some(s) if s <= dec!(1) => self.tier_1 += 1,
            Some(s) if s <= dec!(2) => self.tier_2 += 1,
            Some(s) if s <= dec!(3) => self.tier_3 += 1,
            Some(s) if s <= dec!(4) => self.tier_4 += 1,
            Some(_) => self.tier_5 += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.tier_1 + self.tier_2 + self.tier_3 + self.tier_4 + self.tier_5 + self.unassigned
    }
}

pub fn risk_distribution(clients: &[ClientRecord]) -> RiskDistribution {
    let mut dist = RiskDistribution::default();
    for c in clients {
        dist.record(c.risk_score);
    }
    dist
}

/// Firm-wide holdings by asset class, all six buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub equities: Money,
    pub bonds: Money,
    pub cash: Money,
    pub alternatives: Money,
    pub property: Money,
    pub other: Money,
}

impl AssetAllocation {
    pub fn add(&mut self, breakdown: &PortfolioBreakdown) {
        self.equities += breakdown.equities;
        self.bonds += breakdown.bonds;
        self.cash += breakdown.cash;
        self.alternatives += breakdown.alternatives;
        self.property += breakdown.property;
        self.other += breakdown.other;
    }

    pub fn total(&self) -> Money {
        self.equities + self.bonds + self.cash + self.alternatives + self.property + self.other
    }
}

pub fn asset_allocation<'a>(
    breakdowns: impl IntoIterator<Item = &'a PortfolioBreakdown>,
) -> AssetAllocation {
    let mut alloc = AssetAllocation::default();
    for b in breakdowns {
        alloc.add(b);
    }
    alloc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(score: Option<Decimal>) -> ClientRecord {
        ClientRecord {
            id: "x".into(),
            risk_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_risk_bands() {
        let clients: Vec<ClientRecord> = [
            Some(dec!(0)),
            Some(dec!(1)),
            Some(dec!(1.5)),
            Some(dec!(3)),
            Some(dec!(4)),
            Some(dec!(7)),
            Some(dec!(10)),
            None,
        ]
        .into_iter()
        .map(scored)
        .collect();

        let d = risk_distribution(&clients);
        assert_eq!(
            d,
            RiskDistribution {
                tier_1: 2,
                tier_2: 1,
                tier_3: 1,
                tier_4: 1,
                tier_5: 2,
                unassigned: 1,
            }
        );
        assert_eq!(d.total(), 8);
    }

    #[test]
    fn test_asset_allocation_sums_all_buckets() {
        let a = PortfolioBreakdown {
            equities: dec!(10),
            bonds: dec!(20),
            cash: dec!(30),
            property: dec!(40),
            alternatives: dec!(50),
            other: dec!(60),
            total: dec!(210),
        };
        let alloc = asset_allocation([&a, &a]);
        assert_eq!(alloc.equities, dec!(20));
        assert_eq!(alloc.alternatives, dec!(100));
        assert_eq!(alloc.other, dec!(120));
        assert_eq!(alloc.total(), dec!(420));
    }
}
