//! Adviser-facing prose for impact findings.
//!
//! Text is a pure function of an [`ImpactFinding`]: the figures quoted are
//! exactly the figures the classification branch computed.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::classifier::{ImpactFinding, MacroFactor};
use crate::types::{Money, Percent, Rate, Severity};

pub struct ImpactText {
    pub explanation: String,
    pub recommendation: String,
}

pub fn describe(finding: &ImpactFinding) -> ImpactText {
    let exposure = format_share(finding.exposure);
    let impact = format_gbp(finding.estimated_impact);
    let value = format_percent(finding.factor_value);

    let (explanation, recommendation) = match (finding.factor, finding.level) {
        (MacroFactor::InterestRate, Severity::High) => (
            format!(
                "{exposure} of the portfolio is held in bonds with Bank Rate at {value}. \
                 A further 1% rise in yields could reduce bond values by around {impact}."
            ),
            "Review bond duration and consider shorter-dated gilts or diversifying fixed income holdings.",
        ),
        (MacroFactor::InterestRate, Severity::Medium) => (
            format!(
                "Bonds make up {exposure} of the portfolio. With Bank Rate at {value}, \
                 a 1% move in yields would change bond values by around {impact}."
            ),
            "Monitor rate expectations and check fixed income duration remains suitable.",
        ),
        (MacroFactor::InterestRate, Severity::Low) => (
            format!(
                "Bond exposure of {exposure} limits sensitivity to Bank Rate at {value}; \
                 a 1% move in yields is worth around {impact}."
            ),
            "No action needed on interest rate exposure.",
        ),
        (MacroFactor::Inflation, Severity::High) => (
            format!(
                "{exposure} of the portfolio is held in cash while inflation runs at {value}. \
                 Real purchasing power could fall by around {impact} over the next year."
            ),
            "Consider moving cash beyond the emergency fund into assets with inflation-beating potential.",
        ),
        (MacroFactor::Inflation, level) if finding.estimated_impact < Decimal::ZERO => (
            format!(
                "Cash makes up {exposure} of the portfolio. With prices falling at {value}, \
                 cash holdings gain around {} in real value over the year.",
                format_gbp(-finding.estimated_impact)
            ),
            if level == Severity::Medium {
                "Review cash levels against emergency fund needs."
            } else {
                "Cash holdings look appropriate for current inflation."
            },
        ),
        (MacroFactor::Inflation, Severity::Medium) => (
            format!(
                "Cash makes up {exposure} of the portfolio. At {value} inflation, \
                 cash holdings lose around {impact} in real value each year."
            ),
            "Review cash levels against emergency fund needs.",
        ),
        (MacroFactor::Inflation, Severity::Low) => (
            format!(
                "Cash exposure of {exposure} keeps inflation drag to around {impact} a year \
                 at {value} inflation."
            ),
            "Cash holdings look appropriate for current inflation.",
        ),
        (MacroFactor::Equity, Severity::High) => (
            format!(
                "{exposure} of this conservative portfolio is in equities and the FTSE 100 \
                 moved {} today, a swing worth around {impact}.",
                format_signed_percent(finding.factor_value)
            ),
            "Contact the client to discuss market volatility and confirm the equity allocation still matches their risk profile.",
        ),
        (MacroFactor::Equity, Severity::Medium) => (
            format!(
                "Equities make up {exposure} of the portfolio; the FTSE 100 move of {} \
                 changes its value by around {impact}.",
                format_signed_percent(finding.factor_value)
            ),
            "Monitor equity markets and review the allocation at the next meeting.",
        ),
        (MacroFactor::Equity, Severity::Low) => (
            format!(
                "Equity exposure of {exposure} means the FTSE 100 move of {} has a limited \
                 effect (around {impact}).",
                format_signed_percent(finding.factor_value)
            ),
            "No action needed on equity exposure.",
        ),
    };

    ImpactText {
        explanation,
        recommendation: recommendation.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// 0.523 -> "52.3%"
pub fn format_share(share: Rate) -> String {
    format!("{}%", (share * dec!(100)).round_dp(1).normalize())
}

/// 4.5 -> "4.5%"
pub fn format_percent(value: Percent) -> String {
    format!("{}%", value.round_dp(2).normalize())
}

/// -1.2 -> "-1.2%", 0.8 -> "+0.8%"
pub fn format_signed_percent(value: Percent) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_percent(value))
    } else {
        format_percent(value)
    }
}

/// Whole pounds with thousands separators: 12345.67 -> "£12,346".
pub fn format_gbp(amount: Money) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(factor: MacroFactor, level: Severity) -> ImpactFinding {
        ImpactFinding {
            factor,
            level,
            exposure: dec!(0.4235),
            estimated_impact: dec!(12_345.67),
            factor_value: dec!(-1.75),
        }
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(format_gbp(dec!(0)), "£0");
        assert_eq!(format_gbp(dec!(999)), "£999");
        assert_eq!(format_gbp(dec!(1_000)), "£1,000");
        assert_eq!(format_gbp(dec!(12_345.67)), "£12,346");
        assert_eq!(format_gbp(dec!(1_234_567)), "£1,234,567");
        assert_eq!(format_gbp(dec!(-2_500)), "-£2,500");
    }

    #[test]
    fn test_format_gbp_rounds_half_up() {
        assert_eq!(format_gbp(dec!(2.5)), "£3");
        assert_eq!(format_gbp(dec!(1_000.5)), "£1,001");
        assert_eq!(format_gbp(dec!(-2.5)), "-£3");
    }

    #[test]
    fn test_deflation_reads_as_a_gain() {
        let text = describe(&ImpactFinding {
            factor: MacroFactor::Inflation,
            level: Severity::Medium,
            exposure: dec!(0.5),
            estimated_impact: dec!(-1_000),
            factor_value: dec!(-2),
        });
        assert!(text.explanation.contains("gain around £1,000"));
        assert!(!text.explanation.contains("lose"));
        assert_eq!(text.recommendation, "Review cash levels against emergency fund needs.");
    }

    #[test]
    fn test_format_percentages() {
        assert_eq!(format_share(dec!(0.4235)), "42.4%");
        assert_eq!(format_share(dec!(0.5)), "50%");
        assert_eq!(format_percent(dec!(5.25)), "5.25%");
        assert_eq!(format_signed_percent(dec!(0.8)), "+0.8%");
        assert_eq!(format_signed_percent(dec!(-1.75)), "-1.75%");
    }

    #[test]
    fn test_every_branch_quotes_its_figures() {
        for factor in [MacroFactor::InterestRate, MacroFactor::Inflation, MacroFactor::Equity] {
            for level in [Severity::High, Severity::Medium, Severity::Low] {
                let text = describe(&finding(factor, level));
                assert!(text.explanation.contains("42.4%"), "{factor:?}/{level:?}");
                assert!(text.explanation.contains("£12,346"), "{factor:?}/{level:?}");
                assert!(text.explanation.contains("1.75%"), "{factor:?}/{level:?}");
                assert!(!text.recommendation.is_empty());
            }
        }
    }
}
