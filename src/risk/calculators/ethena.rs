// Ethena Protocol Risk Calculator
// USDe is delta-hedged with perps: funding stress and peg drift are the risk

use chrono::{DateTime, Utc};

use crate::risk::thresholds::{max_penalty, penalty_above, ScoringConfig, Tier};
use crate::risk::{EthenaMetrics, ProtocolKind, ProtocolMetrics, ProtocolRiskCalculator, RiskError};

/// Ethena-specific risk calculator
#[derive(Debug, Clone)]
pub struct EthenaRiskCalculator {
    funding_rate_tiers: Vec<Tier>,
    depeg_risk_tiers: Vec<Tier>,
}

impl EthenaRiskCalculator {
    /// Create a new Ethena risk calculator with default thresholds
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            funding_rate_tiers: config.funding_rate_tiers.clone(),
            depeg_risk_tiers: config.depeg_risk_tiers.clone(),
        }
    }

    /// Funding and de-peg sub-penalties stack
    pub fn deviation_penalty(&self, metrics: &EthenaMetrics) -> f64 {
        let funding = penalty_above(metrics.funding_rate.abs(), &self.funding_rate_tiers);
        let depeg = penalty_above(metrics.depeg_risk, &self.depeg_risk_tiers);
        funding + depeg
    }

    pub fn max_deviation_penalty(&self) -> f64 {
        max_penalty(&self.funding_rate_tiers) + max_penalty(&self.depeg_risk_tiers)
    }
}

impl Default for EthenaRiskCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolRiskCalculator for EthenaRiskCalculator {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Ethena
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["funding_rate", "depeg_risk", "liveness"]
    }

    fn temporal_penalty(&self, metrics: &ProtocolMetrics, _now: DateTime<Utc>) -> Result<f64, RiskError> {
        self.ensure_handles(metrics)?;
        Ok(0.0)
    }

    fn depeg_penalty(&self, metrics: &ProtocolMetrics) -> Result<f64, RiskError> {
        match metrics {
            ProtocolMetrics::Ethena(ethena) => Ok(self.deviation_penalty(ethena)),
            other => Err(RiskError::ProtocolMismatch {
                expected: self.protocol_name().to_string(),
                found: other.kind().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethena(funding_rate: f64, depeg_risk: f64) -> EthenaMetrics {
        EthenaMetrics {
            funding_rate,
            depeg_risk,
            confidence: None,
        }
    }

    #[test]
    fn test_funding_rate_uses_absolute_value() {
        let calculator = EthenaRiskCalculator::new();
        assert_eq!(calculator.deviation_penalty(&ethena(0.06, 0.0)), 20.0);
        assert_eq!(calculator.deviation_penalty(&ethena(-0.06, 0.0)), 20.0);
        assert_eq!(calculator.deviation_penalty(&ethena(-0.03, 0.0)), 10.0);
        assert_eq!(calculator.deviation_penalty(&ethena(0.02, 0.0)), 0.0);
    }

    #[test]
    fn test_sub_penalties_stack() {
        let calculator = EthenaRiskCalculator::new();
        assert_eq!(calculator.deviation_penalty(&ethena(0.03, 0.015)), 18.0);
        assert_eq!(calculator.deviation_penalty(&ethena(1.0, 1.0)), 35.0);
        assert_eq!(calculator.max_deviation_penalty(), 35.0);
    }

    #[test]
    fn test_no_temporal_penalty() {
        let calculator = EthenaRiskCalculator::new();
        let metrics = ProtocolMetrics::Ethena(ethena(0.5, 0.5));
        assert_eq!(calculator.temporal_penalty(&metrics, Utc::now()).unwrap(), 0.0);
    }
}
