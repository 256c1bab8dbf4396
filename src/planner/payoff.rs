//! Multi-debt payoff planning.
//!
//! Given a portfolio of debts and a fixed monthly budget, simulates paying
//! every minimum and directing the rest of the budget at one debt at a time.
//! When a debt is retired its share of the budget rolls on to the next one.

use crate::amortization::engine::amortize_month;
use crate::core::config::EngineConfig;
use crate::core::debt::{DebtId, DebtPortfolio};
use crate::core::error::EngineError;
use crate::core::rate::AnnualRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Which debt receives money beyond the minimums first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffOrder {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

impl fmt::Display for PayoffOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Avalanche => write!(f, "avalanche"),
            Self::Snowball => write!(f, "snowball"),
        }
    }
}

impl std::str::FromStr for PayoffOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avalanche" => Ok(Self::Avalanche),
            "snowball" => Ok(Self::Snowball),
            other => Err(format!("unknown payoff order '{}'", other)),
        }
    }
}

/// Outcome for one debt within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    pub id: DebtId,
    pub principal: Decimal,
    /// Month the debt reached zero, if it did.
    pub payoff_month: Option<u32>,
    pub interest_paid: Decimal,
    pub total_paid: Decimal,
    pub remaining_balance: Decimal,
}

/// Result of simulating a portfolio under one payoff order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    order: PayoffOrder,
    monthly_budget: Decimal,
    months: u32,
    debts: Vec<DebtPayoff>,
    /// Debts in the order they were retired.
    payoff_sequence: Vec<DebtId>,
}

impl PayoffPlan {
    pub fn order(&self) -> PayoffOrder {
        self.order
    }

    pub fn monthly_budget(&self) -> Decimal {
        self.monthly_budget
    }

    /// Number of simulated months.
    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn debts(&self) -> &[DebtPayoff] {
        &self.debts
    }

    pub fn debt(&self, id: &DebtId) -> Option<&DebtPayoff> {
        self.debts.iter().find(|d| &d.id == id)
    }

    pub fn payoff_sequence(&self) -> &[DebtId] {
        &self.payoff_sequence
    }

    pub fn total_paid(&self) -> Decimal {
        self.debts.iter().map(|d| d.total_paid).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.debts.iter().map(|d| d.interest_paid).sum()
    }

    pub fn is_debt_free(&self) -> bool {
        self.debts.iter().all(|d| d.remaining_balance.is_zero())
    }

    /// True when the month ceiling was reached with debt outstanding.
    pub fn is_saturated(&self) -> bool {
        !self.is_debt_free()
    }
}

impl fmt::Display for PayoffPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Payoff Plan ({}) ===", self.order)?;
        writeln!(f, "Monthly Budget: {}", self.monthly_budget)?;
        if self.is_debt_free() {
            writeln!(f, "Debt Free In:   {} months", self.months)?;
        } else {
            writeln!(f, "Debt Free In:   not within {} months", self.months)?;
        }
        writeln!(f, "Total Paid:     {}", self.total_paid().round_dp(2))?;
        writeln!(f, "Total Interest: {}", self.total_interest().round_dp(2))?;

        writeln!(f, "\nPayoff Sequence:")?;
        for id in &self.payoff_sequence {
            if let Some(d) = self.debt(id) {
                let month = d.payoff_month.unwrap_or_default();
                writeln!(
                    f,
                    "  month {:>4}  {:<16} interest {}",
                    month,
                    d.id,
                    d.interest_paid.round_dp(2)
                )?;
            }
        }
        for d in self.debts.iter().filter(|d| d.payoff_month.is_none()) {
            writeln!(f, "  open        {:<16} {} outstanding", d.id, d.remaining_balance.round_dp(2))?;
        }
        Ok(())
    }
}

/// Avalanche and snowball plans for the same portfolio and budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub avalanche: PayoffPlan,
    pub snowball: PayoffPlan,
}

impl PayoffComparison {
    /// Interest the avalanche order saves over snowball.
    pub fn avalanche_interest_savings(&self) -> Decimal {
        self.snowball.total_interest() - self.avalanche.total_interest()
    }
}

#[derive(Debug, Clone)]
struct OpenDebt {
    index: usize,
    rate: AnnualRate,
    minimum: Decimal,
    balance: Decimal,
    interest_paid: Decimal,
    total_paid: Decimal,
    payoff_month: Option<u32>,
}

/// Simulates paying down a portfolio under a fixed monthly budget.
#[derive(Debug, Clone, Default)]
pub struct PayoffPlanner {
    config: EngineConfig,
}

impl PayoffPlanner {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulate `portfolio` month by month.
    ///
    /// # Algorithm
    ///
    /// Each month:
    /// 1. Every open debt accrues interest on its balance.
    /// 2. Each receives its minimum payment, capped at what it owes.
    /// 3. The rest of the budget goes to open debts in priority order,
    ///    each taking at most what it still owes.
    /// 4. Payments cover interest first; any remainder reduces the balance.
    ///
    /// Stops when every balance is zero or at `max_months`.
    pub fn plan(
        &self,
        portfolio: &DebtPortfolio,
        monthly_budget: Decimal,
        order: PayoffOrder,
    ) -> Result<PayoffPlan, EngineError> {
        self.config.validate()?;
        if portfolio.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        if monthly_budget <= Decimal::ZERO {
            return Err(EngineError::NonPositiveBudget(monthly_budget));
        }
        let minimums = portfolio.total_minimum_payment();
        if monthly_budget < minimums {
            return Err(EngineError::BudgetBelowMinimums {
                budget: monthly_budget,
                minimums,
            });
        }

        let mut open: Vec<OpenDebt> = portfolio
            .debts()
            .iter()
            .enumerate()
            .map(|(index, d)| OpenDebt {
                index,
                rate: d.annual_rate(),
                minimum: d.minimum_payment(),
                balance: d.principal(),
                interest_paid: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                payoff_month: None,
            })
            .collect();
        let mut payoff_sequence = Vec::new();
        let mut month = 0u32;

        while month < self.config.max_months && open.iter().any(|d| !d.balance.is_zero()) {
            month += 1;

            let mut priority: Vec<usize> = (0..open.len())
                .filter(|&i| !open[i].balance.is_zero())
                .collect();
            priority.sort_by(|&a, &b| Self::priority(order, &open[a], &open[b]));

            let accrued: Vec<Decimal> = open
                .iter()
                .map(|d| self.config.round_interest(d.rate.monthly_interest(d.balance)))
                .collect();
            let owed: Vec<Decimal> = open
                .iter()
                .zip(&accrued)
                .map(|(d, a)| d.balance + a)
                .collect();

            let mut allocation = vec![Decimal::ZERO; open.len()];
            let mut remaining = monthly_budget;
            for &i in &priority {
                allocation[i] = open[i].minimum.min(owed[i]);
                remaining -= allocation[i];
            }
            for &i in &priority {
                if remaining <= Decimal::ZERO {
                    break;
                }
                let extra = remaining.min(owed[i] - allocation[i]);
                allocation[i] += extra;
                remaining -= extra;
            }

            for &i in &priority {
                let debt = &mut open[i];
                if allocation[i].is_zero() {
                    continue;
                }
                let step = amortize_month(
                    debt.balance,
                    accrued[i],
                    allocation[i],
                    self.config.settlement_tolerance,
                );
                debt.balance = step.balance;
                debt.interest_paid += step.interest;
                debt.total_paid += step.payment;

                if debt.balance.is_zero() {
                    debt.payoff_month = Some(month);
                    let id = portfolio.debts()[debt.index].id().clone();
                    log::debug!("{} retired in month {} ({})", id, month, order);
                    payoff_sequence.push(id);
                }
            }
        }

        let debts: Vec<DebtPayoff> = open
            .iter()
            .map(|d| {
                let source = &portfolio.debts()[d.index];
                DebtPayoff {
                    id: source.id().clone(),
                    principal: source.principal(),
                    payoff_month: d.payoff_month,
                    interest_paid: d.interest_paid,
                    total_paid: d.total_paid,
                    remaining_balance: d.balance,
                }
            })
            .collect();

        let plan = PayoffPlan {
            order,
            monthly_budget,
            months: month,
            debts,
            payoff_sequence,
        };

        if plan.is_saturated() {
            log::warn!(
                "{} plan with budget {} still owes debt after {} months",
                order,
                monthly_budget,
                month
            );
        } else {
            log::debug!(
                "{} plan with budget {}: debt free in {} months, {} interest",
                order,
                monthly_budget,
                month,
                plan.total_interest()
            );
        }
        Ok(plan)
    }

    /// Run both payoff orders.
    pub fn compare(
        &self,
        portfolio: &DebtPortfolio,
        monthly_budget: Decimal,
    ) -> Result<PayoffComparison, EngineError> {
        Ok(PayoffComparison {
            avalanche: self.plan(portfolio, monthly_budget, PayoffOrder::Avalanche)?,
            snowball: self.plan(portfolio, monthly_budget, PayoffOrder::Snowball)?,
        })
    }

    fn priority(order: PayoffOrder, a: &OpenDebt, b: &OpenDebt) -> Ordering {
        let primary = match order {
            PayoffOrder::Avalanche => b
                .rate
                .cmp(&a.rate)
                .then_with(|| a.balance.cmp(&b.balance)),
            PayoffOrder::Snowball => a
                .balance
                .cmp(&b.balance)
                .then_with(|| b.rate.cmp(&a.rate)),
        };
        primary.then_with(|| a.index.cmp(&b.index))
    }
}
