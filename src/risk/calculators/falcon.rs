// Falcon Protocol Risk Calculator
// Short redemption cooldowns leave little room to react to a de-peg

use chrono::{DateTime, Utc};

use crate::risk::thresholds::{penalty_below, ScoringConfig, Tier};
use crate::risk::{FalconMetrics, ProtocolKind, ProtocolMetrics, ProtocolRiskCalculator, RiskError};

/// Falcon-specific risk calculator
#[derive(Debug, Clone)]
pub struct FalconRiskCalculator {
    cooldown_tiers: Vec<Tier>,
}

impl FalconRiskCalculator {
    /// Create a new Falcon risk calculator with default thresholds
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            cooldown_tiers: config.cooldown_tiers.clone(),
        }
    }

    pub fn cooldown_penalty(&self, metrics: &FalconMetrics) -> f64 {
        match metrics.cooldown_days {
            Some(days) => penalty_below(days, &self.cooldown_tiers),
            None => 0.0,
        }
    }
}

impl Default for FalconRiskCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolRiskCalculator for FalconRiskCalculator {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Falcon
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["redemption_cooldown", "liveness"]
    }

    fn temporal_penalty(&self, metrics: &ProtocolMetrics, _now: DateTime<Utc>) -> Result<f64, RiskError> {
        match metrics {
            ProtocolMetrics::Falcon(falcon) => Ok(self.cooldown_penalty(falcon)),
            other => Err(RiskError::ProtocolMismatch {
                expected: self.protocol_name().to_string(),
                found: other.kind().to_string(),
            }),
        }
    }
}
