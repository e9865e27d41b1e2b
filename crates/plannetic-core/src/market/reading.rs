use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Percent;
use crate::PlanneticResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where a market figure came from and how fresh it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataProvenance {
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_stale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Equity index level with its daily move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexReading {
    #[serde(default)]
    pub value: Decimal,
    /// Day-on-day move in percent (-1.2 = down 1.2%).
    #[serde(default)]
    pub change_percent: Percent,
    #[serde(default)]
    pub provenance: DataProvenance,
}

/// A single rate figure in percent (Bank Rate, CPI inflation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateReading {
    #[serde(default)]
    pub value: Percent,
    #[serde(default)]
    pub provenance: DataProvenance,
}

/// Additional index carried for display only; not used in classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIndex {
    pub name: String,
    #[serde(default)]
    pub value: Decimal,
    #[serde(default)]
    pub change_percent: Percent,
    #[serde(default)]
    pub provenance: DataProvenance,
}

/// Immutable market snapshot for one analytics pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketReading {
    #[serde(default)]
    pub ftse100: IndexReading,
    #[serde(default)]
    pub boe_rate: RateReading,
    #[serde(default)]
    pub inflation: RateReading,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended: Vec<ExtendedIndex>,
}

impl MarketReading {
    /// Build a reading from bare figures with no provenance attached.
    pub fn new(
        ftse_value: Decimal,
        ftse_change_percent: Percent,
        bank_rate: Percent,
        inflation: Percent,
    ) -> Self {
        Self {
            ftse100: IndexReading {
                value: ftse_value,
                change_percent: ftse_change_percent,
                provenance: DataProvenance::default(),
            },
            boe_rate: RateReading {
                value: bank_rate,
                provenance: DataProvenance::default(),
            },
            inflation: RateReading {
                value: inflation,
                provenance: DataProvenance::default(),
            },
            extended: Vec::new(),
        }
    }

    pub fn bank_rate(&self) -> Percent {
        self.boe_rate.value
    }

    pub fn inflation_rate(&self) -> Percent {
        self.inflation.value
    }

    pub fn equity_change_percent(&self) -> Percent {
        self.ftse100.change_percent
    }

    /// Human-readable notes for every stale or errored figure.
    pub fn quality_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut check = |label: &str, p: &DataProvenance| {
            let source = if p.source.is_empty() {
                "unknown source"
            } else {
                p.source.as_str()
            };
            if p.is_stale {
                match p.last_updated {
                    Some(ts) => warnings.push(format!(
                        "{label} reading from {source} is stale (last updated {})",
                        ts.to_rfc3339()
                    )),
                    None => warnings.push(format!("{label} reading from {source} is stale")),
                }
            }
            if let Some(ref e) = p.error {
                warnings.push(format!("{label} reading from {source} reported an error: {e}"));
            }
        };

        check("FTSE 100", &self.ftse100.provenance);
        check("Bank Rate", &self.boe_rate.provenance);
        check("Inflation", &self.inflation.provenance);
        for idx in &self.extended {
            check(idx.name.as_str(), &idx.provenance);
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Supplies the market snapshot. The live implementation sits behind an
/// HTTP client outside this crate.
pub trait MarketDataProvider {
    fn fetch(&self) -> PlanneticResult<MarketReading>;
}

impl MarketDataProvider for MarketReading {
    fn fetch(&self) -> PlanneticResult<MarketReading> {
        Ok(self.clone())
    }
}
