// Protocol Risk Calculator Traits and Core Interfaces
use chrono::{DateTime, Utc};

use crate::risk::{ProtocolKind, ProtocolMetrics, RiskError};

/// Core trait that all protocol-specific risk calculators must implement.
///
/// Calculators are pure: same metrics and `now` in, same penalties out.
pub trait ProtocolRiskCalculator: Send + Sync {
    /// Protocol this calculator handles
    fn protocol(&self) -> ProtocolKind;

    /// Get the risk factors this calculator considers
    fn risk_factors(&self) -> Vec<&'static str>;

    /// Penalty for time pressure (maturity, cooldown). Zero when the data is absent.
    fn temporal_penalty(&self, metrics: &ProtocolMetrics, now: DateTime<Utc>) -> Result<f64, RiskError>;

    /// Penalty for peg deviation. Only synthetic dollars carry one.
    fn depeg_penalty(&self, metrics: &ProtocolMetrics) -> Result<f64, RiskError> {
        self.ensure_handles(metrics)?;
        Ok(0.0)
    }

    fn protocol_name(&self) -> &'static str {
        self.protocol().as_str()
    }

    /// Get the version of this risk calculator (for tracking changes)
    fn version(&self) -> &'static str {
        "1.0.0"
    }

    fn can_handle(&self, metrics: &ProtocolMetrics) -> bool {
        metrics.kind() == self.protocol()
    }

    fn ensure_handles(&self, metrics: &ProtocolMetrics) -> Result<(), RiskError> {
        if self.can_handle(metrics) {
            Ok(())
        } else {
            Err(RiskError::ProtocolMismatch {
                expected: self.protocol_name().to_string(),
                found: metrics.kind().to_string(),
            })
        }
    }

    /// Get configuration parameters for this calculator
    fn get_config(&self) -> serde_json::Value {
        serde_json::json!({
            "protocol": self.protocol_name(),
            "version": self.version(),
            "risk_factors": self.risk_factors()
        })
    }
}
