use chrono::{TimeZone, Utc};
use plannetic_core::client::{
    ClientFinancialProfile, ClientRecord, HoldingsAumCalculator, Investment, Pension,
};
use plannetic_core::firm::{
    analyse_client_book, build_client_impacts, build_firm_analytics, build_review_flags,
    sort_review_flags, ReviewFlag, ReviewTrigger,
};
use plannetic_core::market::{DataProvenance, MarketDataProvider, MarketReading};
use plannetic_core::{PlanneticError, PlanneticResult, Severity};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn client(id: &str, name: &str, risk: Option<Decimal>, liquid: Decimal) -> ClientRecord {
    ClientRecord {
        id: id.into(),
        name: name.into(),
        risk_score: risk,
        profile: ClientFinancialProfile {
            liquid_assets: liquid,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn flag(id: &str, priority: Severity, aum: Decimal) -> ReviewFlag {
    ReviewFlag {
        client_id: id.into(),
        client_name: id.into(),
        risk_profile: dec!(3),
        trigger: ReviewTrigger::InflationRisk,
        reason: String::new(),
        priority,
        aum,
    }
}

// ===========================================================================
// Review flag ordering
// ===========================================================================

#[test]
fn test_flags_rank_by_priority_then_aum() {
    let mut flags = vec![
        flag("low", Severity::Low, dec!(100)),
        flag("high", Severity::High, dec!(50)),
        flag("medium", Severity::Medium, dec!(200)),
    ];
    sort_review_flags(&mut flags);
    let order: Vec<(Severity, Decimal)> = flags.iter().map(|f| (f.priority, f.aum)).collect();
    assert_eq!(
        order,
        vec![
            (Severity::High, dec!(50)),
            (Severity::Medium, dec!(200)),
            (Severity::Low, dec!(100)),
        ]
    );
}

#[test]
fn test_equal_keys_keep_input_order() {
    let mut flags = vec![
        flag("first", Severity::High, dec!(10)),
        flag("second", Severity::High, dec!(10)),
        flag("third", Severity::High, dec!(10)),
    ];
    sort_review_flags(&mut flags);
    let ids: Vec<&str> = flags.iter().map(|f| f.client_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn test_build_review_flags_across_book() {
    // Hot inflation, high Bank Rate, sharp FTSE rise
    let reading = MarketReading::new(dec!(7_800), dec!(2.4), dec!(5.25), dec!(3.4));
    let clients = vec![
        client("cautious-small", "A Small", Some(dec!(2)), dec!(50)),
        client("growth", "B Growth", Some(dec!(6)), dec!(200)),
        client("cautious-large", "C Large", Some(dec!(1)), dec!(500)),
        client("balanced", "D Balanced", None, dec!(1_000)),
    ];
    let flags = build_review_flags(&clients, &reading, &HoldingsAumCalculator);

    let summary: Vec<(&str, Severity, ReviewTrigger)> = flags
        .iter()
        .map(|f| (f.client_id.as_str(), f.priority, f.trigger))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("cautious-large", Severity::High, ReviewTrigger::InflationRisk),
            ("cautious-small", Severity::High, ReviewTrigger::InflationRisk),
            ("growth", Severity::Medium, ReviewTrigger::RateOpportunity),
            ("cautious-large", Severity::Low, ReviewTrigger::EquityVolatility),
            ("cautious-small", Severity::Low, ReviewTrigger::EquityVolatility),
        ]
    );
}

// ===========================================================================
// Firm analytics
// ===========================================================================

fn book() -> Vec<ClientRecord> {
    vec![
        ClientRecord {
            id: "c-1".into(),
            name: "Margaret Hamilton".into(),
            risk_score: Some(dec!(2)),
            profile: ClientFinancialProfile {
                liquid_assets: dec!(60_000),
                investments: vec![Investment::new("Gilts", dec!(40_000))],
                ..Default::default()
            },
            ..Default::default()
        },
        ClientRecord {
            id: "c-2".into(),
            name: "Katherine Johnson".into(),
            risk_score: Some(dec!(8)),
            profile: ClientFinancialProfile {
                investments: vec![
                    Investment::new("Global Equity", dec!(300_000)),
                    Investment::new("Buy to let property", dec!(200_000)),
                ],
                pensions: vec![Pension {
                    current_value: dec!(100_000),
                    monthly_contribution: dec!(1_000),
                }],
                ..Default::default()
            },
            ..Default::default()
        },
        ClientRecord {
            id: "c-3".into(),
            name: "Dorothy Vaughan".into(),
            risk_score: None,
            ..Default::default()
        },
    ]
}

#[test]
fn test_firm_analytics_aggregates_book() {
    let reading = MarketReading::new(dec!(7_700), dec!(-0.4), dec!(5.25), dec!(3.2));
    let as_of = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let out = build_firm_analytics(&book(), &reading, &HoldingsAumCalculator, as_of);
    let fa = &out.result;

    assert_eq!(fa.firm_aum, dec!(700_000));
    assert_eq!(fa.client_count, 3);
    assert_eq!(fa.risk_distribution.tier_2, 1);
    assert_eq!(fa.risk_distribution.tier_5, 1);
    assert_eq!(fa.risk_distribution.unassigned, 1);
    assert_eq!(fa.asset_allocation.equities, dec!(360_000));
    assert_eq!(fa.asset_allocation.bonds, dec!(80_000));
    assert_eq!(fa.asset_allocation.cash, dec!(60_000));
    assert_eq!(fa.asset_allocation.property, dec!(200_000));
    assert_eq!(fa.last_updated, as_of);
    assert_eq!(fa.market_conditions, reading);

    let ids: Vec<(&str, Severity)> = fa
        .clients_needing_review
        .iter()
        .map(|f| (f.client_id.as_str(), f.priority))
        .collect();
    assert_eq!(ids, vec![("c-1", Severity::High), ("c-2", Severity::Medium)]);

    // property holding and unassigned tier both reported
    assert_eq!(out.warnings.len(), 2);
}

#[test]
fn test_stale_market_data_is_warned() {
    let mut reading = MarketReading::new(dec!(7_700), dec!(0), dec!(4), dec!(2));
    reading.ftse100.provenance = DataProvenance {
        source: "LSE".into(),
        last_updated: None,
        is_stale: true,
        error: None,
    };
    let out = build_firm_analytics(&[], &reading, &HoldingsAumCalculator, Utc::now());
    assert_eq!(out.result.firm_aum, Decimal::ZERO);
    assert!(out.result.clients_needing_review.is_empty());
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("FTSE 100"));
}

#[test]
fn test_client_impacts_keep_book_order() {
    let reading = MarketReading::new(dec!(7_700), dec!(-1.5), dec!(5.25), dec!(3.2));
    let rows = build_client_impacts(&book(), &reading, &HoldingsAumCalculator);
    let ids: Vec<&str> = rows.iter().map(|r| r.client_id.as_str()).collect();
    assert_eq!(ids, vec!["c-1", "c-2", "c-3"]);

    // c-1: 60% cash at 3.2% inflation
    assert_eq!(rows[0].inflation_impact, Severity::High);
    assert_eq!(rows[0].initials, "MH");
    // c-2: 360k equities of 600k AUM, volatile move, growth client
    assert_eq!(rows[1].equity_impact, Severity::Medium);
    assert_eq!(rows[1].portfolio.unreconciled(), dec!(200_000));
    // c-3: empty book
    assert_eq!(rows[2].aum, Decimal::ZERO);
    assert_eq!(rows[2].rate_details.exposure_percent, Decimal::ZERO);
    assert_eq!(rows[2].risk_profile, dec!(3));
}

struct OfflineFeed;

impl MarketDataProvider for OfflineFeed {
    fn fetch(&self) -> PlanneticResult<MarketReading> {
        Err(PlanneticError::ProviderError {
            provider: "market-data".into(),
            reason: "connection refused".into(),
        })
    }
}

#[test]
fn test_analyse_client_book_propagates_provider_errors() {
    let result = analyse_client_book(&book(), &OfflineFeed, &HoldingsAumCalculator, Utc::now());
    assert!(matches!(result, Err(PlanneticError::ProviderError { .. })));
}

#[test]
fn test_analyse_client_book_with_in_memory_collaborators() {
    let reading = MarketReading::new(dec!(7_700), dec!(0), dec!(4), dec!(2));
    let out =
        analyse_client_book(&book(), &reading, &HoldingsAumCalculator, Utc::now()).unwrap();
    assert_eq!(out.result.client_count, 3);
}
