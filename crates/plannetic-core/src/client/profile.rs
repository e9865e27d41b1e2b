use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Holdings
// ---------------------------------------------------------------------------

/// A single investment holding. The type tag is free text entered by the
/// adviser ("Stocks & Shares ISA", "Gilt fund", "Buy-to-let property", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    #[serde(default, alias = "type")]
    pub investment_type: String,
    #[serde(default)]
    pub current_value: Money,
}

impl Investment {
    pub fn new(investment_type: impl Into<String>, current_value: Money) -> Self {
        Self {
            investment_type: investment_type.into(),
            current_value,
        }
    }
}

/// A pension pot. Contributions are monthly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pension {
    #[serde(default)]
    pub current_value: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
}

/// Per-client financial snapshot. Every field defaults to zero/empty when
/// absent from the source record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientFinancialProfile {
    #[serde(default)]
    pub liquid_assets: Money,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub pensions: Vec<Pension>,
    #[serde(default)]
    pub annual_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
}

impl ClientFinancialProfile {
    pub fn investment_value(&self) -> Money {
        self.investments.iter().map(|i| i.current_value).sum()
    }

    pub fn pension_value(&self) -> Money {
        self.pensions.iter().map(|p| p.current_value).sum()
    }

    pub fn monthly_pension_contributions(&self) -> Money {
        self.pensions.iter().map(|p| p.monthly_contribution).sum()
    }

    pub fn annual_expenses(&self) -> Money {
        self.monthly_expenses * Decimal::from(12)
    }
}

// ---------------------------------------------------------------------------
// Client record
// ---------------------------------------------------------------------------

/// One client as held by the record store. Personal details stay raw
/// (strings, optional flags) so data-quality problems surface during
/// derivation rather than at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Attitude-to-risk score, nominally 1-10. `None` when no assessment
    /// has been completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerable: Option<bool>,
    #[serde(default)]
    pub profile: ClientFinancialProfile,
}

/// Marital status as far as the projection assumptions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Married,
    CivilPartnership,
    Other,
}

impl MaritalStatus {
    /// Parse a free-text status. Unknown or missing values map to `Other`.
    pub fn from_label(label: Option<&str>) -> Self {
        let normalised = match label {
            Some(l) => l.trim().to_lowercase().replace(['_', '-'], " "),
            None => return MaritalStatus::Other,
        };
        match normalised.as_str() {
            "married" => MaritalStatus::Married,
            "civil partnership" | "civil partner" | "civil partnered" => {
                MaritalStatus::CivilPartnership
            }
            _ => MaritalStatus::Other,
        }
    }

    pub fn has_partner(self) -> bool {
        matches!(
            self,
            MaritalStatus::Married | MaritalStatus::CivilPartnership
        )
    }
}
