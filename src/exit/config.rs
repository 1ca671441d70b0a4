use serde::{Deserialize, Serialize};

use crate::risk::RiskError;

/// De-peg fractions applied to the redemption path during stress testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepegScenarios {
    pub best: f64,
    pub mid: f64,
    pub worst: f64,
}

impl Default for DepegScenarios {
    fn default() -> Self {
        Self {
            best: 0.0,
            mid: 0.005,
            worst: 0.02,
        }
    }
}

/// Fee and yield assumptions for the exit comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitConfig {
    /// Fraction of notional lost to price impact on a market sale
    pub slippage_rate: f64,
    /// Flat network fee, in quote currency
    pub gas_cost: f64,
    /// Yield accrued per unit per cooldown day
    pub daily_yield_rate: f64,
    pub depeg_scenarios: DepegScenarios,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            slippage_rate: 0.004,
            gas_cost: 5.0,
            daily_yield_rate: 0.024,
            depeg_scenarios: DepegScenarios::default(),
        }
    }
}

impl ExitConfig {
    pub fn validate(&self) -> Result<(), RiskError> {
        let rates = [
            ("slippage_rate", self.slippage_rate),
            ("gas_cost", self.gas_cost),
            ("daily_yield_rate", self.daily_yield_rate),
            ("depeg_scenarios.best", self.depeg_scenarios.best),
            ("depeg_scenarios.mid", self.depeg_scenarios.mid),
            ("depeg_scenarios.worst", self.depeg_scenarios.worst),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::ConfigurationError {
                    message: format!("{} must be a non-negative number, got {}", field, value),
                });
            }
        }
        if self.slippage_rate >= 1.0 {
            return Err(RiskError::ConfigurationError {
                message: format!("slippage_rate must be below 1, got {}", self.slippage_rate),
            });
        }
        Ok(())
    }
}
