use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::age::resolve_age;
use super::assumptions::ScenarioAssumptions;
use super::tables::{allocation_for, resolve_risk_score, returns_for, RealReturns, TargetAllocation};
use crate::client::{ClientFinancialProfile, ClientRecord, MaritalStatus};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the deriver reads. `as_of` stands in for "today" so results
/// are reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub client_id: String,
    #[serde(default)]
    pub profile: ClientFinancialProfile,
    #[serde(default)]
    pub risk_score: Option<Decimal>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub vulnerable: Option<bool>,
    pub as_of: NaiveDate,
}

impl ScenarioInput {
    pub fn from_record(record: &ClientRecord, as_of: NaiveDate) -> Self {
        Self {
            client_id: record.id.clone(),
            profile: record.profile.clone(),
            risk_score: record.risk_score,
            date_of_birth: record.date_of_birth.clone(),
            marital_status: record.marital_status.clone(),
            vulnerable: record.vulnerable,
            as_of,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub client_age: u32,
    pub retirement_age: u32,
    pub life_expectancy: u32,
    pub projection_years: u32,
    pub state_pension_age: u32,
}

/// Annual income and the split of annual expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub annual_income: Money,
    pub annual_expenses: Money,
    pub essential_expenses: Money,
    pub lifestyle_expenses: Money,
    pub discretionary_expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPosition {
    pub current_savings: Money,
    pub investment_value: Money,
    pub pension_value: Money,
    pub annual_pension_contributions: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementGoals {
    pub target_income: Money,
    pub desired_income: Money,
    pub state_pension_amount: Money,
    /// True when income exceeds the personal allowance and the full rate
    /// is assumed.
    pub full_state_pension: bool,
}

/// Extra caution applied for clients flagged as vulnerable. Serialises to
/// `{}` when the client is not vulnerable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityAdjustments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conservative_assumptions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_cash_buffer: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_risk_tolerance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_monitoring: Option<bool>,
}

impl VulnerabilityAdjustments {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parameter set for a new cash-flow projection scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowScenarioParameters {
    pub client_id: String,
    /// Score actually used for the table lookups (after defaulting and
    /// clamping).
    pub risk_score: u8,
    pub demographics: Demographics,
    pub inflation_rate: Percent,
    pub real_returns: RealReturns,
    pub allocation: TargetAllocation,
    pub income: IncomeProfile,
    pub assets: AssetPosition,
    pub goals: RetirementGoals,
    pub vulnerability_adjustments: VulnerabilityAdjustments,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Derive projection parameters from a client's raw profile.
///
/// Never fails: data-quality problems (no date of birth, no risk
/// assessment, out-of-range score) fall back to defaults and are reported
/// in `warnings`. Assumptions that fail `validate()` are replaced by
/// `ScenarioAssumptions::default()` with a warning.
pub fn derive_scenario_parameters(
    input: &ScenarioInput,
    assumptions: &ScenarioAssumptions,
) -> ComputationOutput<CashFlowScenarioParameters> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let defaults;
    let assumptions = match assumptions.validate() {
        Ok(()) => assumptions,
        Err(e) => {
            tracing::warn!(client_id = %input.client_id, error = %e, "invalid scenario assumptions");
            warnings.push(format!("{e}; default assumptions used"));
            defaults = ScenarioAssumptions::default();
            &defaults
        }
    };

    // --- Risk score ---
    let risk_score = resolve_risk_score(input.risk_score, assumptions.default_risk_score);
    match input.risk_score {
        None => warnings.push(format!(
            "No risk score on file; default score {risk_score} used"
        )),
        Some(raw) if Decimal::from(risk_score) != raw => {
            tracing::warn!(client_id = %input.client_id, %raw, risk_score, "risk score adjusted");
            if raw < Decimal::ONE || raw > Decimal::TEN {
                warnings.push(format!(
                    "Risk score {raw} outside the 1-10 table; {risk_score} used"
                ));
            } else {
                warnings.push(format!("Risk score {raw} rounded to {risk_score}"));
            }
        }
        Some(_) => {}
    }

    // --- Demographics ---
    let age = resolve_age(input.date_of_birth.as_deref(), input.as_of, assumptions);
    if let Some(ref reason) = age.defaulted {
        tracing::warn!(
            client_id = %input.client_id,
            reason = %reason,
            default_age = age.age,
            "substituting default age"
        );
        warnings.push(format!("{reason}; default age {} used", age.age));
    }
    let client_age = age.age;

    let marital = MaritalStatus::from_label(input.marital_status.as_deref());
    let life_expectancy = if marital.has_partner() {
        assumptions.base_life_expectancy + assumptions.partner_life_expectancy_bonus
    } else {
        assumptions.base_life_expectancy
    };

    let retirement_age = assumptions
        .default_retirement_age
        .max(client_age + 1)
        .min(assumptions.max_retirement_age);

    let demographics = Demographics {
        client_age,
        retirement_age,
        life_expectancy,
        projection_years: life_expectancy.saturating_sub(client_age),
        state_pension_age: assumptions.state_pension_age,
    };

    // --- Income and expenses ---
    let profile = &input.profile;
    let annual_income = profile.annual_income;
    let annual_expenses = profile.annual_expenses();
    let income = IncomeProfile {
        annual_income,
        annual_expenses,
        essential_expenses: annual_expenses * assumptions.essential_expense_share,
        lifestyle_expenses: annual_expenses * assumptions.lifestyle_expense_share,
        discretionary_expenses: annual_expenses * assumptions.discretionary_expense_share,
    };

    let assets = AssetPosition {
        current_savings: profile.liquid_assets,
        investment_value: profile.investment_value(),
        pension_value: profile.pension_value(),
        annual_pension_contributions: profile.monthly_pension_contributions()
            * Decimal::from(12),
    };

    // --- Retirement goals ---
    let full_state_pension = annual_income > assumptions.personal_allowance;
    let state_pension_amount = if full_state_pension {
        assumptions.state_pension_full_rate
    } else {
        assumptions.state_pension_full_rate * assumptions.reduced_state_pension_ratio
    };
    let goals = RetirementGoals {
        target_income: annual_income * assumptions.retirement_income_target_ratio,
        desired_income: annual_income * assumptions.retirement_income_desired_ratio,
        state_pension_amount,
        full_state_pension,
    };

    let vulnerability_adjustments = if input.vulnerable.unwrap_or(false) {
        VulnerabilityAdjustments {
            conservative_assumptions: Some(true),
            additional_cash_buffer: Some(assumptions.vulnerability_cash_buffer),
            reduced_risk_tolerance: Some(true),
            enhanced_monitoring: Some(true),
        }
    } else {
        VulnerabilityAdjustments::default()
    };

    tracing::debug!(
        client_id = %input.client_id,
        risk_score,
        client_age,
        retirement_age,
        "derived scenario parameters"
    );

    let output = CashFlowScenarioParameters {
        client_id: input.client_id.clone(),
        risk_score,
        demographics,
        inflation_rate: assumptions.inflation_rate,
        real_returns: returns_for(risk_score),
        allocation: allocation_for(risk_score),
        income,
        assets,
        goals,
        vulnerability_adjustments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Risk-tier lookup (real returns, target allocation) with percentage-of-income heuristics",
        assumptions,
        warnings,
        elapsed,
        output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Pension;
    use rust_decimal_macros::dec;

    fn jan_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn default_input() -> ScenarioInput {
        ScenarioInput {
            client_id: "client-1".into(),
            profile: ClientFinancialProfile {
                liquid_assets: dec!(20_000),
                investments: vec![],
                pensions: vec![Pension {
                    current_value: dec!(200_000),
                    monthly_contribution: dec!(500),
                }],
                annual_income: dec!(100_000),
                monthly_expenses: dec!(3_000),
            },
            risk_score: Some(dec!(8)),
            date_of_birth: Some("1980-01-01".into()),
            marital_status: Some("single".into()),
            vulnerable: Some(false),
            as_of: jan_2024(),
        }
    }

    #[test]
    fn test_reference_client() {
        let out = derive_scenario_parameters(&default_input(), &ScenarioAssumptions::default());
        let p = &out.result;
        assert_eq!(p.demographics.client_age, 44);
        assert_eq!(p.demographics.retirement_age, 67);
        assert_eq!(p.demographics.life_expectancy, 85);
        assert_eq!(p.demographics.projection_years, 41);
        assert_eq!(p.allocation.equity, dec!(85));
        assert_eq!(p.income.essential_expenses, dec!(25_200));
        assert_eq!(p.income.lifestyle_expenses, dec!(7_200));
        assert_eq!(p.income.discretionary_expenses, dec!(3_600));
        assert!(p.goals.full_state_pension);
        assert_eq!(p.goals.state_pension_amount, dec!(11_502));
        assert_eq!(p.goals.target_income, dec!(65_000));
        assert_eq!(p.goals.desired_income, dec!(80_000));
        assert_eq!(p.assets.annual_pension_contributions, dec!(6_000));
        assert!(p.vulnerability_adjustments.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_partner_adds_life_expectancy() {
        let mut input = default_input();
        input.marital_status = Some("Civil Partnership".into());
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.demographics.life_expectancy, 87);
    }

    #[test]
    fn test_retirement_age_bounds() {
        let mut input = default_input();
        input.date_of_birth = Some("1954-01-01".into()); // 70
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.demographics.retirement_age, 71);

        input.date_of_birth = Some("1944-01-01".into()); // 80
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.demographics.retirement_age, 75);
    }

    #[test]
    fn test_low_income_gets_reduced_state_pension() {
        let mut input = default_input();
        input.profile.annual_income = dec!(12_570);
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert!(!out.result.goals.full_state_pension);
        assert_eq!(out.result.goals.state_pension_amount, dec!(8_051.4));
    }

    #[test]
    fn test_vulnerable_client_gets_adjustments() {
        let mut input = default_input();
        input.vulnerable = Some(true);
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        let adj = &out.result.vulnerability_adjustments;
        assert_eq!(adj.conservative_assumptions, Some(true));
        assert_eq!(adj.additional_cash_buffer, Some(dec!(20)));
        assert_eq!(adj.reduced_risk_tolerance, Some(true));
        assert_eq!(adj.enhanced_monitoring, Some(true));
    }

    #[test]
    fn test_empty_adjustments_serialise_as_empty_object() {
        let json = serde_json::to_string(&VulnerabilityAdjustments::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_missing_risk_score_defaults_to_five() {
        let mut input = default_input();
        input.risk_score = None;
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.risk_score, 5);
        assert_eq!(out.result.allocation.equity, dec!(60));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_date_of_birth_warns() {
        let mut input = default_input();
        input.date_of_birth = Some("not-a-date".into());
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.demographics.client_age, 40);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("not-a-date"));
    }

    #[test]
    fn test_invalid_assumptions_fall_back_to_defaults() {
        let assumptions = ScenarioAssumptions {
            min_age: 70,
            max_age: 60,
            ..ScenarioAssumptions::default()
        };
        let out = derive_scenario_parameters(&default_input(), &assumptions);
        assert_eq!(out.result.demographics.client_age, 44);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("min_age"));
        assert!(out.warnings[0].contains("default assumptions used"));
    }

    #[test]
    fn test_fractional_risk_score_reported_as_rounded() {
        let mut input = default_input();
        input.risk_score = Some(dec!(7.4));
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.risk_score, 7);
        assert_eq!(out.warnings, vec!["Risk score 7.4 rounded to 7".to_string()]);
    }

    #[test]
    fn test_out_of_range_risk_score_reported_as_clamped() {
        let mut input = default_input();
        input.risk_score = Some(dec!(12));
        let out = derive_scenario_parameters(&input, &ScenarioAssumptions::default());
        assert_eq!(out.result.risk_score, 10);
        assert_eq!(
            out.warnings,
            vec!["Risk score 12 outside the 1-10 table; 10 used".to_string()]
        );
    }
}
