//! Cash-flow scenario parameter derivation from a client's raw profile.

pub mod age;
pub mod assumptions;
pub mod deriver;
pub mod tables;

pub use age::{age_on, parse_date_of_birth, resolve_age};
pub use assumptions::ScenarioAssumptions;
pub use deriver::{
    derive_scenario_parameters, CashFlowScenarioParameters, ScenarioInput,
    VulnerabilityAdjustments,
};
pub use tables::{allocation_for, resolve_risk_score, returns_for, RealReturns, TargetAllocation};
