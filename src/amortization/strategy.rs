use crate::core::error::EngineError;
use crate::core::rate::AnnualRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MINIMUM: &str = "minimum";
pub const RECOMMENDED: &str = "recommended";
pub const AGGRESSIVE: &str = "aggressive";

/// How a strategy drives its schedule: a fixed payment, or a payoff
/// horizon the payment is derived from.
///
/// Variants can only be built through [`PaymentPlan::by_payment`],
/// [`PaymentPlan::by_months`] or deserialization, all of which validate.
///
/// ```compile_fail
/// use debt_payoff_engine::amortization::strategy::PaymentPlan;
/// use rust_decimal_macros::dec;
///
/// let plan = PaymentPlan::ByPayment { monthly_payment: dec!(-1) };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", try_from = "RawPaymentPlan")]
pub enum PaymentPlan {
    #[non_exhaustive]
    ByPayment { monthly_payment: Decimal },
    #[non_exhaustive]
    ByMonths { months: u32 },
}

/// Wire shape of a [`PaymentPlan`] before validation.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawPaymentPlan {
    ByPayment { monthly_payment: Decimal },
    ByMonths { months: u32 },
}

impl TryFrom<RawPaymentPlan> for PaymentPlan {
    type Error = EngineError;

    fn try_from(raw: RawPaymentPlan) -> Result<Self, Self::Error> {
        match raw {
            RawPaymentPlan::ByPayment { monthly_payment } => Self::by_payment(monthly_payment),
            RawPaymentPlan::ByMonths { months } => Self::by_months(months),
        }
    }
}

impl PaymentPlan {
    pub fn by_payment(monthly_payment: Decimal) -> Result<Self, EngineError> {
        if monthly_payment <= Decimal::ZERO {
            return Err(EngineError::NonPositivePayment(monthly_payment));
        }
        Ok(Self::ByPayment { monthly_payment })
    }

    pub fn by_months(months: u32) -> Result<Self, EngineError> {
        if months == 0 {
            return Err(EngineError::ZeroMonths);
        }
        Ok(Self::ByMonths { months })
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByPayment { monthly_payment } => write!(f, "pay {} / month", monthly_payment),
            Self::ByMonths { months } => write!(f, "pay off in {} months", months),
        }
    }
}

/// A strategy as it arrives from a form or JSON file: either field may be
/// missing. Converting it into a [`PaymentPlan`] requires exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_months: Option<u32>,
}

impl StrategyDefinition {
    pub fn into_plan(self) -> Result<(String, PaymentPlan), EngineError> {
        let plan = match (self.monthly_payment, self.target_months) {
            (Some(_), Some(_)) => return Err(EngineError::AmbiguousPlan(self.name)),
            (None, None) => return Err(EngineError::MissingPlan(self.name)),
            (Some(payment), None) => PaymentPlan::by_payment(payment)?,
            (None, Some(months)) => PaymentPlan::by_months(months)?,
        };
        Ok((self.name, plan))
    }
}

/// Named strategies, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategySet {
    strategies: Vec<(String, PaymentPlan)>,
}

impl StrategySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard presets: the debt's minimum payment, a 36-month
    /// payoff and a 24-month payoff.
    ///
    /// ```
    /// use debt_payoff_engine::amortization::strategy::StrategySet;
    /// use rust_decimal_macros::dec;
    ///
    /// let set = StrategySet::standard(dec!(150)).unwrap();
    /// let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
    /// assert_eq!(names, ["minimum", "recommended", "aggressive"]);
    /// ```
    pub fn standard(minimum_payment: Decimal) -> Result<Self, EngineError> {
        let mut set = Self::new();
        set.add(MINIMUM, PaymentPlan::by_payment(minimum_payment)?)?;
        set.add(RECOMMENDED, PaymentPlan::by_months(36)?)?;
        set.add(AGGRESSIVE, PaymentPlan::by_months(24)?)?;
        Ok(set)
    }

    /// Build a set from raw definitions, rejecting malformed or duplicate
    /// entries.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = StrategyDefinition>,
    ) -> Result<Self, EngineError> {
        let mut set = Self::new();
        for definition in definitions {
            let (name, plan) = definition.into_plan()?;
            set.add(name, plan)?;
        }
        Ok(set)
    }

    pub fn add(&mut self, name: impl Into<String>, plan: PaymentPlan) -> Result<(), EngineError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(EngineError::DuplicateStrategy(name));
        }
        self.strategies.push((name, plan));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PaymentPlan> {
        self.strategies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, plan)| plan)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaymentPlan)> {
        self.strategies.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// One strategy reduced to the figures a comparison chart needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub name: String,
    pub plan: PaymentPlan,
    pub monthly_payment: Decimal,
    /// Number of schedule records.
    pub months: u32,
    /// `months / 12`.
    pub years_to_payoff: Decimal,
    pub total_paid: Decimal,
    /// `total_paid − principal`.
    pub total_interest: Decimal,
    /// False when the schedule hit the month ceiling first.
    pub paid_off: bool,
}

/// Summaries for every strategy of one debt, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    principal: Decimal,
    annual_rate: AnnualRate,
    summaries: Vec<StrategySummary>,
}

impl StrategyReport {
    pub(crate) fn new(principal: Decimal, annual_rate: AnnualRate, summaries: Vec<StrategySummary>) -> Self {
        Self {
            principal,
            annual_rate,
            summaries,
        }
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> AnnualRate {
        self.annual_rate
    }

    pub fn summaries(&self) -> &[StrategySummary] {
        &self.summaries
    }

    pub fn get(&self, name: &str) -> Option<&StrategySummary> {
        self.summaries.iter().find(|s| s.name == name)
    }

    /// The paid-off strategy with the least total interest.
    pub fn cheapest(&self) -> Option<&StrategySummary> {
        self.summaries
            .iter()
            .filter(|s| s.paid_off)
            .min_by_key(|s| s.total_interest)
    }
}

impl fmt::Display for StrategyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Strategy Report ===")?;
        writeln!(f, "Principal:      {}", self.principal)?;
        writeln!(f, "Annual Rate:    {}", self.annual_rate)?;

        for s in &self.summaries {
            writeln!(f, "\n--- {} ---", s.name)?;
            writeln!(f, "  Monthly Payment: {}", s.monthly_payment.round_dp(2))?;
            if s.paid_off {
                writeln!(
                    f,
                    "  Payoff:          {} months ({} years)",
                    s.months,
                    s.years_to_payoff.round_dp(2)
                )?;
            } else {
                writeln!(f, "  Payoff:          not within {} months", s.months)?;
            }
            writeln!(f, "  Total Paid:      {}", s.total_paid.round_dp(2))?;
            writeln!(f, "  Total Interest:  {}", s.total_interest.round_dp(2))?;
        }
        Ok(())
    }
}
