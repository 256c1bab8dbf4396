//! Avalanche versus snowball payoff across a household's debts.

use debt_payoff_engine::core::debt::{Debt, DebtId, DebtPortfolio};
use debt_payoff_engine::planner::payoff::PayoffPlanner;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  debt-payoff-engine: Avalanche vs Snowball   ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let mut portfolio = DebtPortfolio::new();
    for (id, principal, rate, minimum) in [
        ("CREDIT-CARD", dec!(4200), dec!(26.99), dec!(126)),
        ("STORE-CARD", dec!(900), dec!(29.99), dec!(40)),
        ("MEDICAL", dec!(650), dec!(0), dec!(50)),
        ("CAR-LOAN", dec!(11500), dec!(6.9), dec!(285)),
        ("STUDENT-LOAN", dec!(18000), dec!(5.5), dec!(195)),
    ] {
        let debt = Debt::new(DebtId::new(id), principal, rate)
            .and_then(|d| d.with_minimum_payment(minimum))
            .expect("valid debt");
        portfolio.add(debt);
    }

    println!("Total owed:       ${}", portfolio.total_principal());
    println!("Minimum payments: ${}/month", portfolio.total_minimum_payment());
    println!("Budget:           $1200/month\n");

    let comparison = PayoffPlanner::default()
        .compare(&portfolio, dec!(1200))
        .expect("budget covers minimums");

    println!("{}", comparison.avalanche);
    println!("{}", comparison.snowball);

    println!("━━━ Verdict ━━━\n");
    println!(
        "Avalanche saves ${} in interest; snowball clears its first debt in month {}.",
        comparison.avalanche_interest_savings().round_dp(2),
        comparison
            .snowball
            .payoff_sequence()
            .first()
            .and_then(|id| comparison.snowball.debt(id))
            .and_then(|d| d.payoff_month)
            .unwrap_or_default()
    );
}
