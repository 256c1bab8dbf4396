use chrono::NaiveDate;
use debt_payoff_engine::amortization::comparison::StrategyComparison;
use debt_payoff_engine::amortization::engine::AmortizationEngine;
use debt_payoff_engine::amortization::strategy::{
    PaymentPlan, StrategyDefinition, StrategySet, AGGRESSIVE, MINIMUM, RECOMMENDED,
};
use debt_payoff_engine::core::config::EngineConfig;
use debt_payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use debt_payoff_engine::core::error::EngineError;
use debt_payoff_engine::planner::payoff::{PayoffOrder, PayoffPlanner};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Full pipeline: debt → strategies → schedule → comparison.
#[test]
fn full_pipeline_credit_card_scenario() {
    let card = Debt::new(DebtId::new("VISA"), dec!(5000), dec!(22))
        .unwrap()
        .with_minimum_payment(dec!(150))
        .unwrap();
    let engine = AmortizationEngine::default();

    let strategies = StrategySet::standard(card.minimum_payment()).unwrap();
    let report = engine
        .summarize_strategies(card.principal(), card.annual_rate().percent(), &strategies)
        .unwrap();

    // Insertion order is preserved
    let names: Vec<&str> = report.summaries().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, [MINIMUM, RECOMMENDED, AGGRESSIVE]);

    // Target-month strategies land on their horizon (±1 for rounding)
    let recommended = report.get(RECOMMENDED).unwrap();
    assert!((i64::from(recommended.months) - 36).abs() <= 1);
    let aggressive = report.get(AGGRESSIVE).unwrap();
    assert!((i64::from(aggressive.months) - 24).abs() <= 1);

    for summary in report.summaries() {
        assert!(summary.paid_off);
        assert_eq!(summary.total_interest, summary.total_paid - dec!(5000));
        assert_eq!(summary.years_to_payoff, Decimal::from(summary.months) / dec!(12));

        // Summary totals match the materialized schedule
        let schedule = engine
            .schedule_for_debt(&card, summary.monthly_payment)
            .unwrap();
        assert_eq!(schedule.len(), summary.months as usize);
        assert_eq!(schedule.total_paid(), summary.total_paid);
        assert!(schedule.is_consistent());
    }

    assert_eq!(report.cheapest().unwrap().name, AGGRESSIVE);

    let comparison = StrategyComparison::against(&report, MINIMUM).unwrap();
    assert!(comparison.baseline_paid_off);
    assert!(comparison.delta(AGGRESSIVE).unwrap().interest_saved > Decimal::ZERO);
}

/// The concrete scenario from the dashboard's sample data.
#[test]
fn first_month_breakdown() {
    let schedule = AmortizationEngine::default()
        .compute_schedule(dec!(5000), dec!(22), dec!(285))
        .unwrap();
    let first = &schedule.records()[0];

    assert_eq!(first.interest, dec!(91.67));
    assert_eq!(first.principal, dec!(193.33));
    assert_eq!(first.balance, dec!(4806.67));
    assert_eq!(
        schedule.payoff_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .checked_add_months(chrono::Months::new(schedule.len() as u32 - 1))
    );
}

/// Payments that never cover interest run to the ceiling.
#[test]
fn non_amortizing_payment_saturates() {
    let engine = AmortizationEngine::new(EngineConfig::default().with_max_months(1200));
    let schedule = engine
        .compute_schedule(dec!(5000), dec!(24), dec!(10))
        .unwrap();

    assert_eq!(schedule.len(), 1200);
    assert!(schedule.final_balance() > Decimal::ZERO);
    assert!(schedule.is_saturated());
    assert_eq!(schedule.payoff_month(), None);

    let set = StrategySet::from_definitions(vec![StrategyDefinition {
        name: "too-small".to_string(),
        monthly_payment: Some(dec!(10)),
        target_months: None,
    }])
    .unwrap();
    let report = engine.summarize_strategies(dec!(5000), dec!(24), &set).unwrap();
    let summary = report.get("too-small").unwrap();
    assert!(!summary.paid_off);
    assert_eq!(summary.months, 1200);
    assert_eq!(summary.years_to_payoff, dec!(100));
}

/// Exact decimal mode keeps the zero-rate case exact.
#[test]
fn zero_rate_exact() {
    assert_eq!(
        AmortizationEngine::compute_fixed_payment(dec!(1200), dec!(0), 12).unwrap(),
        dec!(100)
    );

    let engine = AmortizationEngine::new(EngineConfig::exact());
    let schedule = engine.compute_schedule(dec!(1200), dec!(0), dec!(100)).unwrap();
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.total_paid(), dec!(1200));
}

/// Malformed strategy definitions are rejected rather than defaulted.
#[test]
fn malformed_strategies_fail_fast() {
    let json = r#"[
        { "name": "ok", "monthly_payment": "200" },
        { "name": "broken" }
    ]"#;
    let definitions: Vec<StrategyDefinition> = serde_json::from_str(json).unwrap();
    assert_eq!(
        StrategySet::from_definitions(definitions),
        Err(EngineError::MissingPlan("broken".to_string()))
    );

    let json = r#"[{ "name": "both", "monthly_payment": 200, "target_months": 12 }]"#;
    let definitions: Vec<StrategyDefinition> = serde_json::from_str(json).unwrap();
    assert_eq!(
        StrategySet::from_definitions(definitions),
        Err(EngineError::AmbiguousPlan("both".to_string()))
    );
}

/// Schedules and reports serialize to JSON with decimal strings.
#[test]
fn schedule_serializes() {
    let engine = AmortizationEngine::default();
    let schedule = engine.compute_schedule(dec!(1000), dec!(12), dec!(300)).unwrap();
    let json = serde_json::to_string_pretty(&schedule).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["records"][0]["month"], 1);
    assert_eq!(parsed["records"][0]["interest"], "10.00");
    assert!(parsed.get("principal").is_some());

    let mut set = StrategySet::new();
    set.add("fast", PaymentPlan::by_months(12).unwrap()).unwrap();
    let report = engine.summarize_strategies(dec!(1000), dec!(12), &set).unwrap();
    let parsed = serde_json::to_value(&report).unwrap();
    assert_eq!(parsed["summaries"][0]["plan"]["kind"], "by_months");
}

/// Avalanche versus snowball over a typical household portfolio.
#[test]
fn household_portfolio_payoff() {
    let portfolio: DebtPortfolio = vec![
        Debt::new(DebtId::new("CREDIT-CARD"), dec!(4200), dec!(26.99))
            .unwrap()
            .with_minimum_payment(dec!(126))
            .unwrap(),
        Debt::new(DebtId::new("MEDICAL"), dec!(650), dec!(0))
            .unwrap()
            .with_minimum_payment(dec!(50))
            .unwrap(),
        Debt::new(DebtId::new("STUDENT-LOAN"), dec!(18000), dec!(5.5))
            .unwrap()
            .with_minimum_payment(dec!(195))
            .unwrap(),
        Debt::new(DebtId::new("PERSONAL"), dec!(3000), dec!(11.9))
            .unwrap()
            .with_minimum_payment(dec!(100))
            .unwrap(),
    ]
    .into_iter()
    .collect();

    let comparison = PayoffPlanner::default()
        .compare(&portfolio, dec!(1000))
        .unwrap();

    let avalanche = &comparison.avalanche;
    let snowball = &comparison.snowball;
    assert!(avalanche.is_debt_free());
    assert!(snowball.is_debt_free());
    assert_eq!(avalanche.order(), PayoffOrder::Avalanche);

    assert_eq!(snowball.payoff_sequence()[0], DebtId::new("MEDICAL"));
    assert_eq!(avalanche.payoff_sequence()[0], DebtId::new("CREDIT-CARD"));
    assert!(avalanche.total_interest() <= snowball.total_interest());

    for plan in [avalanche, snowball] {
        assert_eq!(
            plan.total_paid() - plan.total_interest(),
            portfolio.total_principal()
        );
        assert_eq!(plan.payoff_sequence().len(), portfolio.len());
    }

    let json = serde_json::to_value(&comparison).unwrap();
    assert!(json.get("avalanche").is_some());
    assert!(json.get("snowball").is_some());
}
