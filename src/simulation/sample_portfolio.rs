//! Random debt portfolios for demos, benchmarks and seeded dashboards.

use crate::core::debt::{Debt, DebtId, DebtPortfolio};
use crate::core::error::EngineError;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random debt portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of debts to generate.
    pub debt_count: usize,
    /// Smallest principal, in whole currency units.
    pub min_principal: u32,
    /// Largest principal, in whole currency units.
    pub max_principal: u32,
    /// Lowest annual rate, in basis points.
    pub min_rate_bps: u32,
    /// Highest annual rate, in basis points.
    pub max_rate_bps: u32,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 5,
            min_principal: 500,
            max_principal: 25_000,
            min_rate_bps: 299,
            max_rate_bps: 2999,
        }
    }
}

/// Minimum payment a card issuer would typically ask for: the first
/// month's interest plus 1% of principal, rounded up to the cent.
pub fn typical_minimum_payment(debt: &Debt) -> Decimal {
    (debt.first_month_interest() + debt.principal() * dec!(0.01)).round_dp_with_strategy(
        2,
        rust_decimal::RoundingStrategy::AwayFromZero,
    )
}

/// Generate a random portfolio of debts with typical minimum payments.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> Result<DebtPortfolio, EngineError> {
    let mut rng = rand::thread_rng();
    let mut portfolio = DebtPortfolio::new();

    let min_principal = config.min_principal.max(1);
    let max_principal = config.max_principal.max(min_principal);
    let max_rate_bps = config.max_rate_bps.max(config.min_rate_bps);

    for i in 0..config.debt_count {
        let cents = rng.gen_range(u64::from(min_principal) * 100..=u64::from(max_principal) * 100);
        let principal = Decimal::new(cents as i64, 2);
        let bps = rng.gen_range(config.min_rate_bps..=max_rate_bps);
        let rate = Decimal::new(i64::from(bps), 2);

        let debt = Debt::new(DebtId::new(format!("DEBT-{:03}", i)), principal, rate)?;
        let minimum = typical_minimum_payment(&debt);
        portfolio.add(debt.with_minimum_payment(minimum)?);
    }

    log::debug!(
        "generated {} debts totalling {}",
        portfolio.len(),
        portfolio.total_principal()
    );
    Ok(portfolio)
}
