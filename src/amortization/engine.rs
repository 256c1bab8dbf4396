use crate::amortization::strategy::{PaymentPlan, StrategyReport, StrategySet, StrategySummary};
use crate::core::config::EngineConfig;
use crate::core::debt::Debt;
use crate::core::error::EngineError;
use crate::core::rate::AnnualRate;
use crate::core::schedule::{PaymentRecord, Schedule};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decimal places the bisected fixed payment is resolved to.
const PAYMENT_RESOLUTION_DP: u32 = 10;

/// Outcome of applying one month's payment to a balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MonthStep {
    pub payment: Decimal,
    pub interest: Decimal,
    pub unpaid_interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

/// Apply `payment` against `balance` after `accrued` interest.
///
/// Interest is covered first. A payment that does not exceed the accrued
/// interest leaves the balance untouched and the shortfall is reported as
/// unpaid. A remainder at or below `tolerance` is closed out this month.
pub(crate) fn amortize_month(
    balance: Decimal,
    accrued: Decimal,
    payment: Decimal,
    tolerance: Decimal,
) -> MonthStep {
    if payment <= accrued {
        return MonthStep {
            payment,
            interest: payment,
            unpaid_interest: accrued - payment,
            principal: Decimal::ZERO,
            balance,
        };
    }

    let mut principal = (payment - accrued).min(balance);
    if balance - principal <= tolerance {
        principal = balance;
    }

    MonthStep {
        payment: accrued + principal,
        interest: accrued,
        unpaid_interest: Decimal::ZERO,
        principal,
        balance: balance - principal,
    }
}

fn validate_schedule_inputs(
    principal: Decimal,
    annual_rate: Decimal,
    monthly_payment: Decimal,
) -> Result<AnnualRate, EngineError> {
    if principal <= Decimal::ZERO {
        return Err(EngineError::NonPositivePrincipal(principal));
    }
    let rate = AnnualRate::new(annual_rate)?;
    if monthly_payment <= Decimal::ZERO {
        return Err(EngineError::NonPositivePayment(monthly_payment));
    }
    Ok(rate)
}

/// Lazily produces the records of a schedule, one month per call.
///
/// Lets callers that only need totals fold over the schedule without
/// holding every record in memory.
#[derive(Debug, Clone)]
pub struct ScheduleIter<'a> {
    config: &'a EngineConfig,
    rate: AnnualRate,
    payment: Decimal,
    balance: Decimal,
    month: u32,
    max_months: u32,
}

impl ScheduleIter<'_> {
    /// Balance remaining after the records produced so far.
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Iterator for ScheduleIter<'_> {
    type Item = PaymentRecord;

    fn next(&mut self) -> Option<PaymentRecord> {
        if self.balance.is_zero() || self.month >= self.max_months {
            return None;
        }
        self.month += 1;

        let accrued = self
            .config
            .round_interest(self.rate.monthly_interest(self.balance));
        let step = amortize_month(
            self.balance,
            accrued,
            self.payment,
            self.config.settlement_tolerance,
        );
        self.balance = step.balance;

        Some(PaymentRecord {
            month: self.month,
            balance: step.balance,
            payment: step.payment,
            interest: step.interest,
            principal: step.principal,
            unpaid_interest: step.unpaid_interest,
        })
    }
}

/// Totals of a schedule, computed without materializing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub monthly_payment: Decimal,
    pub months: u32,
    pub total_paid: Decimal,
    pub total_interest: Decimal,
    pub total_principal: Decimal,
    pub final_balance: Decimal,
    pub paid_off: bool,
}

/// The amortization engine.
///
/// Every operation is a pure function of its arguments and the engine's
/// configuration; the engine holds no other state.
///
/// # Examples
///
/// ```
/// use debt_payoff_engine::amortization::engine::AmortizationEngine;
/// use rust_decimal_macros::dec;
///
/// let engine = AmortizationEngine::default();
/// let schedule = engine.compute_schedule(dec!(5000), dec!(22), dec!(285)).unwrap();
///
/// let first = &schedule.records()[0];
/// assert_eq!(first.interest, dec!(91.67));
/// assert_eq!(first.principal, dec!(193.33));
/// assert_eq!(first.balance, dec!(4806.67));
/// assert!(schedule.is_paid_off());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Month-by-month schedule for a fixed payment, bounded by the
    /// configured `max_months`.
    pub fn compute_schedule(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        monthly_payment: Decimal,
    ) -> Result<Schedule, EngineError> {
        self.compute_schedule_with_limit(
            principal,
            annual_rate,
            monthly_payment,
            self.config.max_months,
        )
    }

    /// Month-by-month schedule for a fixed payment with an explicit ceiling.
    ///
    /// A payment that never covers the monthly interest produces exactly
    /// `max_months` records with the balance unchanged.
    pub fn compute_schedule_with_limit(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        monthly_payment: Decimal,
        max_months: u32,
    ) -> Result<Schedule, EngineError> {
        let iter = self.iter_schedule_with_limit(principal, annual_rate, monthly_payment, max_months)?;
        let rate = iter.rate;
        let records: Vec<PaymentRecord> = iter.collect();
        let schedule = Schedule::new(principal, rate, monthly_payment, max_months, records);

        if schedule.is_saturated() {
            log::warn!(
                "payment {} never retires {} at {}: stopped after {} months with {} outstanding",
                monthly_payment,
                principal,
                rate,
                max_months,
                schedule.final_balance()
            );
        } else {
            log::debug!(
                "schedule for {} at {} paying {}: {} months, {} total",
                principal,
                rate,
                monthly_payment,
                schedule.len(),
                schedule.total_paid()
            );
        }
        Ok(schedule)
    }

    /// Schedule for a [`Debt`] at the given payment.
    pub fn schedule_for_debt(&self, debt: &Debt, monthly_payment: Decimal) -> Result<Schedule, EngineError> {
        self.compute_schedule(debt.principal(), debt.annual_rate().percent(), monthly_payment)
    }

    /// Lazy schedule bounded by the configured `max_months`.
    pub fn iter_schedule(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        monthly_payment: Decimal,
    ) -> Result<ScheduleIter<'_>, EngineError> {
        self.iter_schedule_with_limit(
            principal,
            annual_rate,
            monthly_payment,
            self.config.max_months,
        )
    }

    pub fn iter_schedule_with_limit(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        monthly_payment: Decimal,
        max_months: u32,
    ) -> Result<ScheduleIter<'_>, EngineError> {
        let rate = validate_schedule_inputs(principal, annual_rate, monthly_payment)?;
        if max_months == 0 {
            return Err(EngineError::ZeroMaxMonths);
        }
        Ok(ScheduleIter {
            config: &self.config,
            rate,
            payment: monthly_payment,
            balance: principal,
            month: 0,
            max_months,
        })
    }

    /// Fold a schedule into its totals without keeping the records.
    pub fn summarize_payment(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        monthly_payment: Decimal,
    ) -> Result<PaymentSummary, EngineError> {
        let mut iter = self.iter_schedule(principal, annual_rate, monthly_payment)?;
        let mut months = 0u32;
        let mut total_paid = Decimal::ZERO;
        let mut total_interest = Decimal::ZERO;
        let mut total_principal = Decimal::ZERO;

        for record in iter.by_ref() {
            months = record.month;
            total_paid += record.payment;
            total_interest += record.interest;
            total_principal += record.principal;
        }

        let final_balance = iter.balance();
        Ok(PaymentSummary {
            monthly_payment,
            months,
            total_paid,
            total_interest,
            total_principal,
            final_balance,
            paid_off: final_balance.is_zero(),
        })
    }

    /// Fixed monthly payment that retires `principal` in exactly `months`
    /// payments, in exact decimal arithmetic.
    ///
    /// `payment = P·r·(1+r)^n / ((1+r)^n − 1)` with `r = rate / 1200`,
    /// evaluated as `P·r / (1 − (1+r)^−n)`. A zero monthly rate yields
    /// `P / n`. When `(1+r)^n` exceeds decimal range the payment converges
    /// to `P·r` and that limit is returned.
    ///
    /// Engines that round interest should use [`fixed_payment`](Self::fixed_payment).
    ///
    /// ```
    /// use debt_payoff_engine::amortization::engine::AmortizationEngine;
    /// use rust_decimal_macros::dec;
    ///
    /// let payment = AmortizationEngine::compute_fixed_payment(dec!(1200), dec!(0), 12).unwrap();
    /// assert_eq!(payment, dec!(100));
    /// ```
    pub fn compute_fixed_payment(
        principal: Decimal,
        annual_rate: Decimal,
        months: u32,
    ) -> Result<Decimal, EngineError> {
        if principal <= Decimal::ZERO {
            return Err(EngineError::NonPositivePrincipal(principal));
        }
        let rate = AnnualRate::new(annual_rate)?;
        if months == 0 {
            return Err(EngineError::ZeroMonths);
        }

        let straight_line = principal / Decimal::from(months);
        let r = rate.monthly();
        if r.is_zero() {
            return Ok(straight_line);
        }

        match (Decimal::ONE + r).checked_powu(u64::from(months)) {
            Some(growth) => {
                let discount = Decimal::ONE - Decimal::ONE / growth;
                if discount.is_zero() {
                    // r is below decimal resolution over this horizon.
                    Ok(straight_line)
                } else {
                    Ok(principal * r / discount)
                }
            }
            None => {
                log::debug!(
                    "(1 + {})^{} out of decimal range, using interest-only limit",
                    r,
                    months
                );
                Ok(principal * r)
            }
        }
    }

    /// Fixed monthly payment that retires `principal` in `months` payments
    /// under this engine's interest rounding.
    ///
    /// With exact interest this is [`compute_fixed_payment`](Self::compute_fixed_payment).
    /// With rounded interest the closed form can miss in both directions:
    /// rounded interest may meet the payment so the debt never amortizes,
    /// or round to nothing on small balances so it retires early. The
    /// payment is then bisected to the smallest amount that retires the
    /// debt within `months`.
    ///
    /// ```
    /// use debt_payoff_engine::amortization::engine::AmortizationEngine;
    /// use rust_decimal_macros::dec;
    ///
    /// let engine = AmortizationEngine::default();
    /// let payment = engine.fixed_payment(dec!(100), dec!(19.98), 360).unwrap();
    /// let schedule = engine.compute_schedule(dec!(100), dec!(19.98), payment).unwrap();
    /// assert!(schedule.is_paid_off());
    /// assert!((schedule.len() as i64 - 360).abs() <= 1);
    /// ```
    pub fn fixed_payment(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        months: u32,
    ) -> Result<Decimal, EngineError> {
        let exact = Self::compute_fixed_payment(principal, annual_rate, months)?;
        let scale = match self.config.interest_scale {
            Some(scale) => scale,
            None => return Ok(exact),
        };
        let rate = AnnualRate::new(annual_rate)?;

        // Below `lo` at least P/(n+1) is still owed after n months. At `hi`
        // every month retires at least P/n of principal.
        let n = Decimal::from(months);
        let mut lo = principal / (n + Decimal::ONE);
        let mut hi = principal / n
            + self.config.round_interest(rate.monthly_interest(principal))
            + Decimal::new(1, scale.min(28));
        if self.retires_within(principal, rate, exact, months) {
            hi = hi.min(exact);
        } else {
            lo = lo.max(exact);
        }

        let resolution = Decimal::new(1, PAYMENT_RESOLUTION_DP);
        let mut steps = 0u32;
        while hi - lo > resolution {
            let mid = (lo + hi) / Decimal::TWO;
            if mid <= lo || mid >= hi {
                break;
            }
            if self.retires_within(principal, rate, mid, months) {
                hi = mid;
            } else {
                lo = mid;
            }
            steps += 1;
        }

        log::debug!(
            "fixed payment for {} at {} over {} months: {} (closed form {}, {} bisection steps)",
            principal,
            rate,
            months,
            hi,
            exact,
            steps
        );
        Ok(hi)
    }

    fn retires_within(
        &self,
        principal: Decimal,
        rate: AnnualRate,
        payment: Decimal,
        months: u32,
    ) -> bool {
        let mut iter = ScheduleIter {
            config: &self.config,
            rate,
            payment,
            balance: principal,
            month: 0,
            max_months: months,
        };
        for _ in iter.by_ref() {}
        iter.balance().is_zero()
    }

    /// Resolve a plan to its monthly payment.
    pub fn resolve_payment(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        plan: PaymentPlan,
    ) -> Result<Decimal, EngineError> {
        match plan {
            PaymentPlan::ByPayment { monthly_payment } => Ok(monthly_payment),
            PaymentPlan::ByMonths { months } => self.fixed_payment(principal, annual_rate, months),
        }
    }

    /// Summarize every strategy in `strategies` for one debt, in the order
    /// the strategies were defined.
    ///
    /// `total_interest` is reported as `total_paid − principal`.
    pub fn summarize_strategies(
        &self,
        principal: Decimal,
        annual_rate: Decimal,
        strategies: &StrategySet,
    ) -> Result<StrategyReport, EngineError> {
        let rate = AnnualRate::new(annual_rate)?;
        let mut summaries = Vec::with_capacity(strategies.len());

        for (name, plan) in strategies.iter() {
            let monthly_payment = self.resolve_payment(principal, annual_rate, *plan)?;
            let summary = self.summarize_payment(principal, annual_rate, monthly_payment)?;

            if !summary.paid_off {
                log::warn!(
                    "strategy '{}' does not pay off {} within {} months",
                    name,
                    principal,
                    self.config.max_months
                );
            }

            summaries.push(StrategySummary {
                name: name.to_string(),
                plan: *plan,
                monthly_payment,
                months: summary.months,
                years_to_payoff: Decimal::from(summary.months) / dec!(12),
                total_paid: summary.total_paid,
                total_interest: summary.total_paid - principal,
                paid_off: summary.paid_off,
            });
        }

        Ok(StrategyReport::new(principal, rate, summaries))
    }
}
