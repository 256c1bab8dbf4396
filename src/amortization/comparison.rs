use crate::amortization::strategy::StrategyReport;
use crate::core::error::EngineError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How one strategy compares with the baseline strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDelta {
    pub name: String,
    /// Baseline interest minus this strategy's interest.
    pub interest_saved: Decimal,
    /// Baseline months minus this strategy's months. Negative when slower.
    pub months_saved: i64,
    /// Extra cash per month compared with the baseline payment.
    pub extra_monthly_payment: Decimal,
}

impl StrategyDelta {
    /// Interest saved as a share of the baseline's interest, in percent.
    pub fn interest_saved_percent(&self, baseline_interest: Decimal) -> f64 {
        if baseline_interest <= Decimal::ZERO {
            return 0.0;
        }
        (self.interest_saved * Decimal::from(100) / baseline_interest)
            .to_f64()
            .unwrap_or(0.0)
    }
}

/// Strategy report restated relative to one named baseline, typically the
/// minimum-payment strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub baseline: String,
    pub baseline_interest: Decimal,
    pub baseline_months: u32,
    /// False when the baseline never pays the debt off, in which case its
    /// interest figure is only a lower bound.
    pub baseline_paid_off: bool,
    pub deltas: Vec<StrategyDelta>,
}

impl StrategyComparison {
    /// Compare every strategy in `report` against `baseline`.
    pub fn against(report: &StrategyReport, baseline: &str) -> Result<Self, EngineError> {
        let base = report
            .get(baseline)
            .ok_or_else(|| EngineError::UnknownStrategy(baseline.to_string()))?;

        let deltas = report
            .summaries()
            .iter()
            .filter(|s| s.name != base.name)
            .map(|s| StrategyDelta {
                name: s.name.clone(),
                interest_saved: base.total_interest - s.total_interest,
                months_saved: i64::from(base.months) - i64::from(s.months),
                extra_monthly_payment: s.monthly_payment - base.monthly_payment,
            })
            .collect();

        Ok(Self {
            baseline: base.name.clone(),
            baseline_interest: base.total_interest,
            baseline_months: base.months,
            baseline_paid_off: base.paid_off,
            deltas,
        })
    }

    pub fn delta(&self, name: &str) -> Option<&StrategyDelta> {
        self.deltas.iter().find(|d| d.name == name)
    }
}

impl std::fmt::Display for StrategyComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Compared with '{}' ===", self.baseline)?;
        writeln!(f, "Baseline Interest: {}", self.baseline_interest.round_dp(2))?;
        writeln!(f, "Baseline Months:   {}", self.baseline_months)?;
        if !self.baseline_paid_off {
            writeln!(f, "(baseline never pays off; savings are lower bounds)")?;
        }

        for d in &self.deltas {
            writeln!(
                f,
                "  {:<12} +{}/month  saves {} interest ({:.1}%) and {} months",
                d.name,
                d.extra_monthly_payment.round_dp(2),
                d.interest_saved.round_dp(2),
                d.interest_saved_percent(self.baseline_interest),
                d.months_saved
            )?;
        }
        Ok(())
    }
}
