use rust_decimal::Decimal;
use thiserror::Error;

/// Contract violations rejected by the engine and planner.
///
/// Non-convergence (a payment too small to ever retire the debt) is not an
/// error: it yields a saturated schedule instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),
    #[error("annual rate must not be negative, got {0}%")]
    NegativeRate(Decimal),
    #[error("monthly payment must be positive, got {0}")]
    NonPositivePayment(Decimal),
    #[error("minimum payment must not be negative, got {0}")]
    NegativeMinimumPayment(Decimal),
    #[error("payoff horizon must be at least one month")]
    ZeroMonths,
    #[error("max_months must be at least one month")]
    ZeroMaxMonths,
    #[error("strategy '{0}' specifies both a monthly payment and a target month count")]
    AmbiguousPlan(String),
    #[error("strategy '{0}' specifies neither a monthly payment nor a target month count")]
    MissingPlan(String),
    #[error("strategy '{0}' is defined more than once")]
    DuplicateStrategy(String),
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
    #[error("debt portfolio is empty")]
    EmptyPortfolio,
    #[error("monthly budget must be positive, got {0}")]
    NonPositiveBudget(Decimal),
    #[error("monthly budget {budget} does not cover the minimum payments totalling {minimums}")]
    BudgetBelowMinimums { budget: Decimal, minimums: Decimal },
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;
