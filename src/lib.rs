//! # debt-payoff-engine
//!
//! Debt amortization and payment-strategy simulation.
//!
//! Given a debt's principal and annual rate, the engine produces
//! month-by-month payment schedules, derives the fixed payment that retires
//! a debt over a chosen horizon, and summarizes competing payment
//! strategies. A portfolio planner simulates the avalanche and snowball
//! payoff orders across several debts sharing one monthly budget.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: debts, rates, schedules, configuration, errors
//! - **amortization** — Schedule computation, fixed payments, strategy summaries and comparison
//! - **planner** — Multi-debt avalanche / snowball payoff simulation
//! - **simulation** — Random sample portfolios

pub mod amortization;
pub mod core;
pub mod planner;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::comparison::StrategyComparison;
    pub use crate::amortization::engine::{AmortizationEngine, PaymentSummary};
    pub use crate::amortization::strategy::{PaymentPlan, StrategyReport, StrategySet};
    pub use crate::core::config::EngineConfig;
    pub use crate::core::debt::{Debt, DebtId, DebtPortfolio};
    pub use crate::core::error::EngineError;
    pub use crate::core::rate::AnnualRate;
    pub use crate::core::schedule::{PaymentRecord, Schedule};
    pub use crate::planner::payoff::{PayoffOrder, PayoffPlan, PayoffPlanner};
}
