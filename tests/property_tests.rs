use debt_payoff_engine::amortization::engine::AmortizationEngine;
use debt_payoff_engine::amortization::strategy::{PaymentPlan, StrategySet};
use debt_payoff_engine::core::config::EngineConfig;
use debt_payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use debt_payoff_engine::planner::payoff::{PayoffOrder, PayoffPlanner};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Principal between 100.00 and 100,000.00.
fn arb_principal() -> impl Strategy<Value = Decimal> {
    (10_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Annual rate between 0% and 35.99%, in basis points.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..3600i64).prop_map(|bps| Decimal::new(bps, 2))
}

/// Horizon between 1 month and 30 years.
fn arb_months() -> impl Strategy<Value = u32> {
    1u32..=360u32
}

/// A payment covering the first month's interest plus at least 1% of
/// principal, so payoff always lands well inside the month ceiling.
fn arb_amortizing_inputs() -> impl Strategy<Value = (Decimal, Decimal, Decimal)> {
    (arb_principal(), arb_rate(), 0i64..5000i64).prop_map(|(principal, rate, extra_cents)| {
        let interest = (principal * rate / dec!(1200)).round_dp(2);
        let floor = (principal / dec!(100)).round_dp(2);
        (principal, rate, interest + floor + Decimal::new(extra_cents, 2))
    })
}

fn arb_debt(index: usize) -> impl Strategy<Value = Debt> {
    (arb_principal(), arb_rate(), 0i64..2000i64).prop_map(move |(principal, rate, min_cents)| {
        Debt::new(DebtId::new(format!("D{}", index)), principal, rate)
            .unwrap()
            .with_minimum_payment(Decimal::new(min_cents, 2))
            .unwrap()
    })
}

fn arb_portfolio() -> impl Strategy<Value = DebtPortfolio> {
    (1usize..6).prop_flat_map(|n| {
        (0..n)
            .map(arb_debt)
            .collect::<Vec<_>>()
            .prop_map(|debts| debts.into_iter().collect::<DebtPortfolio>())
    })
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Every payment splits exactly into interest + principal,
    // and the balance never rises or goes negative.
    // ===================================================================
    #[test]
    fn schedule_is_consistent(
        principal in arb_principal(),
        rate in arb_rate(),
        payment_cents in 1i64..1_000_000i64,
    ) {
        let engine = AmortizationEngine::new(EngineConfig::default().with_max_months(600));
        let schedule = engine
            .compute_schedule(principal, rate, Decimal::new(payment_cents, 2))
            .unwrap();
        prop_assert!(schedule.is_consistent());
        prop_assert!(!schedule.is_empty());
        prop_assert!(schedule.len() <= 600);
        for window in schedule.records().windows(2) {
            prop_assert!(window[1].balance <= window[0].balance);
        }
    }

    // ===================================================================
    // INVARIANT 2: A payment above the first month's interest always
    // reaches exactly zero.
    // ===================================================================
    #[test]
    fn amortizing_payment_reaches_zero((principal, rate, payment) in arb_amortizing_inputs()) {
        let schedule = AmortizationEngine::default()
            .compute_schedule(principal, rate, payment)
            .unwrap();
        prop_assert!(schedule.is_paid_off());
        prop_assert_eq!(schedule.final_balance(), Decimal::ZERO);
        prop_assert_eq!(schedule.total_principal(), principal);
    }

    // ===================================================================
    // INVARIANT 3: The fixed payment for N months retires the debt in
    // N months, give or take one, with interest rounded to cents.
    // ===================================================================
    #[test]
    fn fixed_payment_round_trip(
        principal in arb_principal(),
        rate in arb_rate(),
        months in arb_months(),
    ) {
        let engine = AmortizationEngine::default();
        let payment = engine.fixed_payment(principal, rate, months).unwrap();
        prop_assert!(payment > Decimal::ZERO);

        let schedule = engine.compute_schedule(principal, rate, payment).unwrap();
        prop_assert!(schedule.is_paid_off());
        let diff = (schedule.len() as i64 - i64::from(months)).abs();
        prop_assert!(
            diff <= 1,
            "{} at {}% over {} months took {} months",
            principal, rate, months, schedule.len()
        );
    }

    // ===================================================================
    // INVARIANT 3b: The closed-form payment round-trips in exact mode.
    // ===================================================================
    #[test]
    fn closed_form_payment_round_trip_exact(
        principal in arb_principal(),
        rate in arb_rate(),
        months in arb_months(),
    ) {
        let payment = AmortizationEngine::compute_fixed_payment(principal, rate, months).unwrap();
        prop_assert!(payment > Decimal::ZERO);

        let schedule = AmortizationEngine::new(EngineConfig::exact())
            .compute_schedule(principal, rate, payment)
            .unwrap();
        let diff = (schedule.len() as i64 - i64::from(months)).abs();
        prop_assert!(
            diff <= 1,
            "{} at {}% over {} months took {} months",
            principal, rate, months, schedule.len()
        );
    }

    // ===================================================================
    // INVARIANT 4: Strategy totals match the schedule they summarize.
    // ===================================================================
    #[test]
    fn strategy_totals_match_schedule(
        (principal, rate, payment) in arb_amortizing_inputs(),
        months in arb_months(),
    ) {
        let engine = AmortizationEngine::default();
        let mut set = StrategySet::new();
        set.add("fixed", PaymentPlan::by_payment(payment).unwrap()).unwrap();
        set.add("horizon", PaymentPlan::by_months(months).unwrap()).unwrap();

        let report = engine.summarize_strategies(principal, rate, &set).unwrap();
        for summary in report.summaries() {
            let schedule = engine
                .compute_schedule(principal, rate, summary.monthly_payment)
                .unwrap();
            let paid: Decimal = schedule.records().iter().map(|r| r.payment).sum();
            prop_assert_eq!(paid, summary.total_paid);
            prop_assert_eq!(summary.total_paid - principal, summary.total_interest);
            prop_assert_eq!(schedule.len() as u32, summary.months);
        }

        let horizon = report.get("horizon").unwrap();
        prop_assert!(horizon.paid_off);
        prop_assert!((i64::from(horizon.months) - i64::from(months)).abs() <= 1);
    }

    // ===================================================================
    // INVARIANT 5: Computation is deterministic.
    // ===================================================================
    #[test]
    fn schedule_is_deterministic((principal, rate, payment) in arb_amortizing_inputs()) {
        let engine = AmortizationEngine::default();
        let a = engine.compute_schedule(principal, rate, payment).unwrap();
        let b = engine.compute_schedule(principal, rate, payment).unwrap();
        prop_assert_eq!(a, b);
    }

    // ===================================================================
    // INVARIANT 6: The planner conserves principal and never pays more
    // than the budget in a month.
    // ===================================================================
    #[test]
    fn planner_conserves_principal(portfolio in arb_portfolio(), extra in 1i64..200_000i64) {
        let budget = portfolio.total_minimum_payment() + Decimal::new(extra, 2);
        let planner = PayoffPlanner::new(EngineConfig::default().with_max_months(600));

        for order in [PayoffOrder::Avalanche, PayoffOrder::Snowball] {
            let plan = planner.plan(&portfolio, budget, order).unwrap();
            let remaining: Decimal = plan.debts().iter().map(|d| d.remaining_balance).sum();
            prop_assert_eq!(
                plan.total_paid() - plan.total_interest() + remaining,
                portfolio.total_principal()
            );
            // Closing out sub-cent dust may exceed the budget once per debt.
            let dust = dec!(0.005) * Decimal::from(portfolio.len() as u64);
            prop_assert!(plan.total_paid() <= budget * Decimal::from(plan.months()) + dust);
            prop_assert!(plan.months() <= 600);
        }
    }
}
