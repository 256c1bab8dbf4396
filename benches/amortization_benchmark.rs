use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debt_payoff_engine::amortization::engine::AmortizationEngine;
use debt_payoff_engine::amortization::strategy::StrategySet;
use debt_payoff_engine::planner::payoff::{PayoffOrder, PayoffPlanner};
use debt_payoff_engine::simulation::sample_portfolio::{generate_random_portfolio, PortfolioConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn bench_schedule_30_years(c: &mut Criterion) {
    let engine = AmortizationEngine::default();
    let payment = engine.fixed_payment(dec!(250000), dec!(6.25), 360).unwrap();

    c.bench_function("schedule_360_months", |b| {
        b.iter(|| engine.compute_schedule(black_box(dec!(250000)), dec!(6.25), payment))
    });
    c.bench_function("summary_360_months", |b| {
        b.iter(|| engine.summarize_payment(black_box(dec!(250000)), dec!(6.25), payment))
    });
}

fn bench_saturated_schedule(c: &mut Criterion) {
    let engine = AmortizationEngine::default();

    c.bench_function("schedule_saturated_1200_months", |b| {
        b.iter(|| engine.compute_schedule(black_box(dec!(5000)), dec!(24), dec!(10)))
    });
}

fn bench_standard_strategies(c: &mut Criterion) {
    let engine = AmortizationEngine::default();
    let set = StrategySet::standard(dec!(150)).unwrap();

    c.bench_function("standard_strategies", |b| {
        b.iter(|| engine.summarize_strategies(black_box(dec!(5000)), dec!(22), &set))
    });
}

fn bench_planner_20_debts(c: &mut Criterion) {
    let portfolio = generate_random_portfolio(&PortfolioConfig {
        debt_count: 20,
        ..Default::default()
    })
    .unwrap();
    let budget = portfolio.total_minimum_payment() + Decimal::from(1_000);
    let planner = PayoffPlanner::default();

    c.bench_function("avalanche_20_debts", |b| {
        b.iter(|| planner.plan(black_box(&portfolio), budget, PayoffOrder::Avalanche))
    });
}

criterion_group!(
    benches,
    bench_schedule_30_years,
    bench_saturated_schedule,
    bench_standard_strategies,
    bench_planner_20_debts
);
criterion_main!(benches);
