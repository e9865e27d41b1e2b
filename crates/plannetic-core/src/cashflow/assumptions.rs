use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlanneticError;
use crate::types::{Money, Percent, Rate};
use crate::PlanneticResult;

/// Scalar constants used by the scenario deriver. Loadable from a partial
/// config file; any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioAssumptions {
    /// Risk score used when the client has no assessment on file.
    pub default_risk_score: u8,
    /// Long-run CPI assumption in percent; returns are quoted real.
    pub inflation_rate: Percent,

    pub default_age: u32,
    pub min_age: u32,
    pub max_age: u32,

    pub base_life_expectancy: u32,
    /// Added for married clients and civil partners.
    pub partner_life_expectancy_bonus: u32,

    pub default_retirement_age: u32,
    pub max_retirement_age: u32,

    pub essential_expense_share: Rate,
    pub lifestyle_expense_share: Rate,
    pub discretionary_expense_share: Rate,

    pub retirement_income_target_ratio: Rate,
    pub retirement_income_desired_ratio: Rate,

    /// Full new State Pension, annual.
    pub state_pension_full_rate: Money,
    /// Income at or below this gets the reduced State Pension estimate.
    pub personal_allowance: Money,
    pub reduced_state_pension_ratio: Rate,
    pub state_pension_age: u32,

    /// Extra cash buffer (percent) applied for vulnerable clients.
    pub vulnerability_cash_buffer: Percent,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            default_risk_score: 5,
            inflation_rate: dec!(2.5),
            default_age: 40,
            min_age: 18,
            max_age: 100,
            base_life_expectancy: 85,
            partner_life_expectancy_bonus: 2,
            default_retirement_age: 67,
            max_retirement_age: 75,
            essential_expense_share: dec!(0.70),
            lifestyle_expense_share: dec!(0.20),
            discretionary_expense_share: dec!(0.10),
            retirement_income_target_ratio: dec!(0.65),
            retirement_income_desired_ratio: dec!(0.80),
            state_pension_full_rate: dec!(11_502),
            personal_allowance: dec!(12_570),
            reduced_state_pension_ratio: dec!(0.70),
            state_pension_age: 67,
            vulnerability_cash_buffer: dec!(20),
        }
    }
}

impl ScenarioAssumptions {
    pub fn validate(&self) -> PlanneticResult<()> {
        if !(1..=10).contains(&self.default_risk_score) {
            return Err(invalid("default_risk_score", "must be between 1 and 10"));
        }
        if self.min_age > self.max_age {
            return Err(invalid("min_age", "must not exceed max_age"));
        }
        if !(self.min_age..=self.max_age).contains(&self.default_age) {
            return Err(invalid("default_age", "must lie within min_age..=max_age"));
        }
        if self.default_retirement_age > self.max_retirement_age {
            return Err(invalid(
                "default_retirement_age",
                "must not exceed max_retirement_age",
            ));
        }

        let ratios = [
            ("essential_expense_share", self.essential_expense_share),
            ("lifestyle_expense_share", self.lifestyle_expense_share),
            ("discretionary_expense_share", self.discretionary_expense_share),
            ("retirement_income_target_ratio", self.retirement_income_target_ratio),
            ("retirement_income_desired_ratio", self.retirement_income_desired_ratio),
            ("reduced_state_pension_ratio", self.reduced_state_pension_ratio),
        ];
        for (field, value) in ratios {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(invalid(field, "must be between 0 and 1"));
            }
        }

        let split = self.essential_expense_share
            + self.lifestyle_expense_share
            + self.discretionary_expense_share;
        if split != Decimal::ONE {
            return Err(invalid(
                "expense_shares",
                &format!("essential + lifestyle + discretionary must equal 1 (got {split})"),
            ));
        }

        let amounts = [
            ("state_pension_full_rate", self.state_pension_full_rate),
            ("personal_allowance", self.personal_allowance),
            ("vulnerability_cash_buffer", self.vulnerability_cash_buffer),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(invalid(field, "must not be negative"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> PlanneticError {
    PlanneticError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}
