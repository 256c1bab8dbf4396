use crate::core::error::EngineError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Hard ceiling on schedule length: 100 years of monthly payments.
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// Engine configuration, passed explicitly to the engine and planner.
///
/// ```
/// use debt_payoff_engine::core::config::EngineConfig;
///
/// let config = EngineConfig::default().with_max_months(360);
/// assert_eq!(config.max_months, 360);
/// assert_eq!(config.interest_scale, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the number of simulated months.
    pub max_months: u32,
    /// Decimal places monthly interest is rounded to (half away from zero).
    /// `None` keeps full decimal precision.
    pub interest_scale: Option<u32>,
    /// A balance left at or below this amount after a payment is treated
    /// as paid off in that same month.
    pub settlement_tolerance: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            interest_scale: Some(2),
            settlement_tolerance: dec!(0.005),
        }
    }
}

impl EngineConfig {
    /// Configuration that never rounds interest.
    pub fn exact() -> Self {
        Self {
            interest_scale: None,
            ..Self::default()
        }
    }

    pub fn with_max_months(mut self, max_months: u32) -> Self {
        self.max_months = max_months;
        self
    }

    pub fn with_interest_scale(mut self, scale: Option<u32>) -> Self {
        self.interest_scale = scale;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_months == 0 {
            return Err(EngineError::ZeroMaxMonths);
        }
        Ok(())
    }

    /// Apply the configured interest rounding.
    pub fn round_interest(&self, interest: Decimal) -> Decimal {
        match self.interest_scale {
            Some(scale) => {
                interest.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
            }
            None => interest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_months, 1200);
        assert_eq!(config.interest_scale, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_interest_half_away_from_zero() {
        let config = EngineConfig::default();
        assert_eq!(config.round_interest(dec!(10.125)), dec!(10.13));
        assert_eq!(config.round_interest(dec!(91.6666)), dec!(91.67));
    }

    #[test]
    fn test_exact_config_keeps_precision() {
        let config = EngineConfig::exact();
        assert_eq!(config.round_interest(dec!(10.125)), dec!(10.125));
    }

    #[test]
    fn test_zero_max_months_rejected() {
        let config = EngineConfig::default().with_max_months(0);
        assert_eq!(config.validate(), Err(EngineError::ZeroMaxMonths));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "max_months": 60 }"#).unwrap();
        assert_eq!(config.max_months, 60);
        assert_eq!(config.interest_scale, Some(2));
        assert_eq!(config.settlement_tolerance, dec!(0.005));
    }
}
