use chrono::{DateTime, Datelike, NaiveDate};

use super::assumptions::ScenarioAssumptions;
use crate::error::PlanneticError;
use crate::PlanneticResult;

/// Accepts ISO dates, RFC 3339 timestamps and UK-style `dd/mm/yyyy`.
pub fn parse_date_of_birth(raw: &str) -> PlanneticResult<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Ok(d);
    }
    Err(PlanneticError::DateError(format!(
        "unrecognised date of birth '{raw}'"
    )))
}

/// Completed years between `dob` and `as_of`. Negative for future dates.
pub fn age_on(dob: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}

/// Age used for projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAge {
    pub age: u32,
    /// Set when the default age was substituted; holds the reason.
    pub defaulted: Option<String>,
}

/// Age as of `as_of`, clamped into the configured bounds. A missing or
/// unparseable date of birth falls back to the default age.
pub fn resolve_age(
    date_of_birth: Option<&str>,
    as_of: NaiveDate,
    assumptions: &ScenarioAssumptions,
) -> ResolvedAge {
    let fallback = |reason: String| ResolvedAge {
        age: assumptions.default_age,
        defaulted: Some(reason),
    };

    let raw = match date_of_birth {
        Some(r) if !r.trim().is_empty() => r,
        _ => return fallback("date of birth missing".to_string()),
    };

    match parse_date_of_birth(raw) {
        Ok(dob) => {
            let age = age_on(dob, as_of)
                .max(assumptions.min_age as i32)
                .min(assumptions.max_age as i32);
            ResolvedAge {
                age: age as u32,
                defaulted: None,
            }
        }
        Err(e) => fallback(e.to_string()),
    }
}
