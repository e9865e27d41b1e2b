pub mod classifier;
pub mod narrative;

pub use classifier::{
    assess, assess_equity_impact, assess_inflation_impact, assess_rate_impact, classify,
    classify_equity, classify_inflation, classify_rate, exposure_ratio, ImpactAssessment,
    ImpactFinding, MacroFactor, ASSUMED_BOND_DURATION, RATE_SHOCK,
};
