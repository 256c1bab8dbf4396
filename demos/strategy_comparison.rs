//! Minimum, recommended and aggressive strategies for one credit card.
//!
//! Shows how the engine turns a single debt into the figures behind the
//! dashboard's strategy chart.

use debt_payoff_engine::amortization::comparison::StrategyComparison;
use debt_payoff_engine::amortization::engine::AmortizationEngine;
use debt_payoff_engine::amortization::strategy::{StrategySet, MINIMUM};
use debt_payoff_engine::core::debt::{Debt, DebtId};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Strategy Comparison     ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let card = Debt::new(DebtId::new("VISA"), dec!(5000), dec!(22))
        .and_then(|d| d.with_minimum_payment(dec!(150)))
        .expect("valid debt");
    let engine = AmortizationEngine::default();

    // --- First months of the recommended plan ---
    println!("━━━ First 6 months at $285/month ━━━\n");

    let schedule = engine
        .schedule_for_debt(&card, dec!(285))
        .expect("valid schedule");
    println!("{:>5} {:>10} {:>10} {:>10} {:>12}", "Month", "Payment", "Interest", "Principal", "Balance");
    for r in schedule.records().iter().take(6) {
        println!(
            "{:>5} {:>10} {:>10} {:>10} {:>12}",
            r.month,
            r.payment.round_dp(2),
            r.interest,
            r.principal.round_dp(2),
            r.balance.round_dp(2)
        );
    }
    println!("  ... paid off after {} months\n", schedule.len());

    // --- Strategy presets ---
    println!("━━━ Strategy Presets ━━━\n");

    let strategies = StrategySet::standard(card.minimum_payment()).expect("valid presets");
    let report = engine
        .summarize_strategies(card.principal(), card.annual_rate().percent(), &strategies)
        .expect("valid strategies");
    println!("{}", report);

    let comparison = StrategyComparison::against(&report, MINIMUM).expect("baseline present");
    println!("{}", comparison);
}
