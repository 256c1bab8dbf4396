use crate::core::rate::AnnualRate;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based month number.
    pub month: u32,
    /// Remaining principal after this month's payment. Never negative.
    pub balance: Decimal,
    /// Cash paid this month: `interest + principal`. Equal to the nominal
    /// payment except in the final month, where it covers only what is
    /// owed. A remainder at or below the settlement tolerance is folded
    /// into that final payment, so it can exceed the nominal amount by at
    /// most the tolerance.
    pub payment: Decimal,
    /// Portion of the payment covering interest.
    pub interest: Decimal,
    /// Portion of the payment reducing the balance.
    pub principal: Decimal,
    /// Interest accrued this month that the payment did not cover.
    /// Not capitalized into the balance.
    pub unpaid_interest: Decimal,
}

impl PaymentRecord {
    /// Interest accrued this month, covered or not.
    pub fn accrued_interest(&self) -> Decimal {
        self.interest + self.unpaid_interest
    }
}

/// A complete month-by-month schedule for one debt.
///
/// The schedule ends when the balance reaches zero or when `max_months`
/// records have been produced, whichever comes first. A schedule that hits
/// the ceiling with a positive balance is *saturated*: the payment never
/// retired the debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    principal: Decimal,
    annual_rate: AnnualRate,
    monthly_payment: Decimal,
    max_months: u32,
    records: Vec<PaymentRecord>,
}

impl Schedule {
    pub(crate) fn new(
        principal: Decimal,
        annual_rate: AnnualRate,
        monthly_payment: Decimal,
        max_months: u32,
        records: Vec<PaymentRecord>,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            monthly_payment,
            max_months,
            records,
        }
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> AnnualRate {
        self.annual_rate
    }

    /// The nominal payment the schedule was computed with.
    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Balance after the last record, or the principal if there are none.
    pub fn final_balance(&self) -> Decimal {
        self.records
            .last()
            .map(|r| r.balance)
            .unwrap_or(self.principal)
    }

    pub fn is_paid_off(&self) -> bool {
        self.final_balance().is_zero()
    }

    /// True when the month ceiling was reached before payoff.
    pub fn is_saturated(&self) -> bool {
        !self.is_paid_off() && self.records.len() as u64 >= u64::from(self.max_months)
    }

    pub fn total_paid(&self) -> Decimal {
        self.records.iter().map(|r| r.payment).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.records.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> Decimal {
        self.records.iter().map(|r| r.principal).sum()
    }

    /// Month number of the final payment, if the debt was paid off.
    pub fn payoff_month(&self) -> Option<u32> {
        if self.is_paid_off() {
            self.records.last().map(|r| r.month)
        } else {
            None
        }
    }

    /// Calendar date of the final payment, taking `first_payment` as the
    /// date of month 1.
    pub fn payoff_date(&self, first_payment: NaiveDate) -> Option<NaiveDate> {
        let month = self.payoff_month()?;
        first_payment.checked_add_months(Months::new(month - 1))
    }

    /// Check the per-record invariants: conservation of each payment,
    /// non-negative parts, and a non-increasing, non-negative balance.
    pub fn is_consistent(&self) -> bool {
        let mut prior = self.principal;
        for (i, record) in self.records.iter().enumerate() {
            if record.month as usize != i + 1
                || record.interest + record.principal != record.payment
                || record.principal < Decimal::ZERO
                || record.interest < Decimal::ZERO
                || record.unpaid_interest < Decimal::ZERO
                || record.balance < Decimal::ZERO
                || record.balance > prior
                || prior - record.principal != record.balance
            {
                return false;
            }
            prior = record.balance;
        }
        true
    }
}
