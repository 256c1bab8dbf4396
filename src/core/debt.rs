use crate::core::error::EngineError;
use crate::core::rate::AnnualRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label identifying a debt within a portfolio (e.g. "VISA-4411").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(String);

impl DebtId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DebtId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A single debt: outstanding principal at a nominal annual rate.
///
/// Debts are immutable once created. Every calculation starts from the
/// debt's principal and recomputes its schedule from scratch.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::debt::{Debt, DebtId};
/// use rust_decimal_macros::dec;
///
/// let card = Debt::new(DebtId::new("VISA"), dec!(5000), dec!(22))
///     .unwrap()
///     .with_minimum_payment(dec!(150))
///     .unwrap();
///
/// assert_eq!(card.principal(), dec!(5000));
/// assert_eq!(card.minimum_payment(), dec!(150));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    id: DebtId,
    /// Balance owed. Always positive.
    principal: Decimal,
    annual_rate: AnnualRate,
    /// Contractual minimum monthly payment. Zero when unknown.
    minimum_payment: Decimal,
}

impl Debt {
    /// Create a debt, rejecting a non-positive principal or negative rate.
    pub fn new(id: DebtId, principal: Decimal, annual_rate: Decimal) -> Result<Self, EngineError> {
        if principal <= Decimal::ZERO {
            return Err(EngineError::NonPositivePrincipal(principal));
        }
        Ok(Self {
            id,
            principal,
            annual_rate: AnnualRate::new(annual_rate)?,
            minimum_payment: Decimal::ZERO,
        })
    }

    /// Set the minimum monthly payment.
    pub fn with_minimum_payment(mut self, minimum: Decimal) -> Result<Self, EngineError> {
        if minimum < Decimal::ZERO {
            return Err(EngineError::NegativeMinimumPayment(minimum));
        }
        self.minimum_payment = minimum;
        Ok(self)
    }

    pub fn id(&self) -> &DebtId {
        &self.id
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> AnnualRate {
        self.annual_rate
    }

    pub fn minimum_payment(&self) -> Decimal {
        self.minimum_payment
    }

    /// Interest the debt accrues in its first month, unrounded.
    pub fn first_month_interest(&self) -> Decimal {
        self.annual_rate.monthly_interest(self.principal)
    }
}

/// An ordered collection of debts handed to the payoff planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtPortfolio {
    debts: Vec<Debt>,
}

impl DebtPortfolio {
    pub fn new() -> Self {
        Self { debts: Vec::new() }
    }

    pub fn add(&mut self, debt: Debt) {
        self.debts.push(debt);
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn get(&self, id: &DebtId) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id() == id)
    }

    /// Sum of all outstanding principals.
    pub fn total_principal(&self) -> Decimal {
        self.debts.iter().map(|d| d.principal()).sum()
    }

    /// Sum of all minimum payments.
    pub fn total_minimum_payment(&self) -> Decimal {
        self.debts.iter().map(|d| d.minimum_payment()).sum()
    }
}

impl FromIterator<Debt> for DebtPortfolio {
    fn from_iter<T: IntoIterator<Item = Debt>>(iter: T) -> Self {
        Self {
            debts: iter.into_iter().collect(),
        }
    }
}
