// Pendle Protocol Risk Calculator
// Principal tokens lose their exit window as maturity approaches

use chrono::{DateTime, Utc};

use crate::risk::thresholds::{penalty_below, ScoringConfig, Tier};
use crate::risk::{PendleMetrics, ProtocolKind, ProtocolMetrics, ProtocolRiskCalculator, RiskError};
use crate::utils::time::days_until;

/// Pendle-specific risk calculator
#[derive(Debug, Clone)]
pub struct PendleRiskCalculator {
    maturity_tiers: Vec<Tier>,
}

impl PendleRiskCalculator {
    /// Create a new Pendle risk calculator with default thresholds
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            maturity_tiers: config.maturity_tiers.clone(),
        }
    }

    /// Penalty for days left until maturity.
    ///
    /// An overdue maturity yields a negative day count and therefore the
    /// heaviest tier.
    pub fn maturity_penalty(&self, metrics: &PendleMetrics, now: DateTime<Utc>) -> f64 {
        match metrics.maturity_date {
            Some(maturity) => penalty_below(days_until(maturity, now) as f64, &self.maturity_tiers),
            None => 0.0,
        }
    }
}

impl Default for PendleRiskCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolRiskCalculator for PendleRiskCalculator {
    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Pendle
    }

    fn risk_factors(&self) -> Vec<&'static str> {
        vec!["maturity_proximity", "liveness"]
    }

    fn temporal_penalty(&self, metrics: &ProtocolMetrics, now: DateTime<Utc>) -> Result<f64, RiskError> {
        match metrics {
            ProtocolMetrics::Pendle(pendle) => Ok(self.maturity_penalty(pendle, now)),
            other => Err(RiskError::ProtocolMismatch {
                expected: self.protocol_name().to_string(),
                found: other.kind().to_string(),
            }),
        }
    }
}
