use crate::core::error::EngineError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal annual interest rate, expressed as a percentage and compounded
/// monthly.
///
/// `18.99` means 18.99% per year, i.e. a monthly periodic rate of
/// `18.99 / 100 / 12`.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::core::rate::AnnualRate;
/// use rust_decimal_macros::dec;
///
/// let apr = AnnualRate::new(dec!(24)).unwrap();
/// assert_eq!(apr.monthly(), dec!(0.02));
/// assert!(AnnualRate::new(dec!(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnualRate(Decimal);

impl AnnualRate {
    pub const ZERO: AnnualRate = AnnualRate(Decimal::ZERO);

    /// Create a rate from a percentage. Negative rates are rejected.
    pub fn new(percent: Decimal) -> Result<Self, EngineError> {
        if percent < Decimal::ZERO {
            return Err(EngineError::NegativeRate(percent));
        }
        Ok(Self(percent))
    }

    /// The rate as a percentage per year.
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Monthly periodic rate as a fraction: `percent / 1200`.
    pub fn monthly(&self) -> Decimal {
        self.0 / dec!(1200)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Interest accrued on `balance` over one month, unrounded.
    pub fn monthly_interest(&self, balance: Decimal) -> Decimal {
        balance * self.monthly()
    }
}

impl fmt::Display for AnnualRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<Decimal> for AnnualRate {
    type Error = EngineError;

    fn try_from(percent: Decimal) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}
