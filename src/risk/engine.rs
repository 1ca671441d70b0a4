// Score Engine - routes a metrics snapshot to its protocol calculator
use chrono::{DateTime, Utc};

use crate::risk::calculators::{
    EthenaRiskCalculator, FalconRiskCalculator, LivenessCalculator, PendleRiskCalculator,
};
use crate::risk::{
    ProtocolKind, ProtocolMetrics, ProtocolRiskCalculator, RiskScore, ScoreBreakdown, ScoringConfig,
    MAX_RISK_SCORE,
};

/// Turns protocol metrics into a PulseScore.
///
/// The engine holds nothing but immutable thresholds, so one instance can
/// be shared by reference across threads and tasks.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: ScoringConfig,
    pendle: PendleRiskCalculator,
    ethena: EthenaRiskCalculator,
    falcon: FalconRiskCalculator,
    liveness: LivenessCalculator,
}

impl ScoreEngine {
    /// Create an engine with the default thresholds
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    /// Create with custom thresholds
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            pendle: PendleRiskCalculator::from_config(&config),
            ethena: EthenaRiskCalculator::from_config(&config),
            falcon: FalconRiskCalculator::from_config(&config),
            liveness: LivenessCalculator::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calculator_for(&self, protocol: ProtocolKind) -> &dyn ProtocolRiskCalculator {
        match protocol {
            ProtocolKind::Pendle => &self.pendle,
            ProtocolKind::Ethena => &self.ethena,
            ProtocolKind::Falcon => &self.falcon,
        }
    }

    pub fn supported_protocols(&self) -> Vec<ProtocolKind> {
        ProtocolKind::ALL.to_vec()
    }

    /// Score a snapshot against an explicit point in time.
    ///
    /// A missing snapshot scores 0: no data is treated as maximal risk.
    pub fn score(&self, metrics: Option<&ProtocolMetrics>, now: DateTime<Utc>) -> RiskScore {
        self.breakdown(metrics, now).score
    }

    /// Score against the wall clock
    pub fn score_now(&self, metrics: Option<&ProtocolMetrics>) -> RiskScore {
        self.score(metrics, Utc::now())
    }

    /// Score together with the penalty each factor contributed
    pub fn breakdown(&self, metrics: Option<&ProtocolMetrics>, now: DateTime<Utc>) -> ScoreBreakdown {
        let Some(metrics) = metrics else {
            return ScoreBreakdown::missing();
        };

        let calculator = self.calculator_for(metrics.kind());
        let penalties = calculator
            .temporal_penalty(metrics, now)
            .and_then(|temporal| calculator.depeg_penalty(metrics).map(|depeg| (temporal, depeg)));

        // calculator_for always matches the variant
        let Ok((temporal_penalty, depeg_penalty)) = penalties else {
            return ScoreBreakdown::missing();
        };
        let liveness_penalty = self.liveness.penalty(metrics.confidence());

        let raw = MAX_RISK_SCORE - (temporal_penalty + depeg_penalty + liveness_penalty);

        ScoreBreakdown {
            temporal_penalty,
            depeg_penalty,
            liveness_penalty,
            score: RiskScore::new(raw),
        }
    }

    /// Score several snapshots at once, keeping input order
    pub fn score_batch<'a, I>(&self, snapshots: I, now: DateTime<Utc>) -> Vec<RiskScore>
    where
        I: IntoIterator<Item = Option<&'a ProtocolMetrics>>,
    {
        snapshots.into_iter().map(|m| self.score(m, now)).collect()
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{EthenaMetrics, FalconMetrics, PendleMetrics, RiskStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_missing_snapshot_scores_zero() {
        let engine = ScoreEngine::new();
        assert_eq!(engine.score(None, now()).value(), 0);
        assert_eq!(engine.score(None, now()).status(), RiskStatus::Critical);
    }

    #[test]
    fn test_healthy_pendle_scores_full() {
        let engine = ScoreEngine::new();
        let metrics = ProtocolMetrics::Pendle(PendleMetrics {
            maturity_date: Some(now() + Duration::days(30)),
            confidence: Some(0.99),
        });
        assert_eq!(engine.score(Some(&metrics), now()).value(), 100);
    }

    #[test]
    fn test_ethena_adversarial_stacking() {
        let engine = ScoreEngine::new();
        let metrics = ProtocolMetrics::Ethena(EthenaMetrics {
            funding_rate: 1.0,
            depeg_risk: 1.0,
            confidence: Some(0.0),
        });
        let breakdown = engine.breakdown(Some(&metrics), now());
        assert_eq!(breakdown.depeg_penalty, 35.0);
        assert_eq!(breakdown.liveness_penalty, 30.0);
        assert_eq!(breakdown.temporal_penalty, 0.0);
        assert_eq!(breakdown.score.value(), 35);
    }

    #[test]
    fn test_falcon_combines_cooldown_and_liveness() {
        let engine = ScoreEngine::new();
        let metrics = ProtocolMetrics::Falcon(FalconMetrics {
            cooldown_days: Some(3.0),
            confidence: Some(0.85),
        });
        assert_eq!(engine.score(Some(&metrics), now()).value(), 70);
    }

    #[test]
    fn test_custom_thresholds_flow_through() {
        let mut config = ScoringConfig::default();
        config.liveness_tiers = vec![crate::risk::Tier::new(0.99, 50.0)];
        let engine = ScoreEngine::with_config(config);
        let metrics = ProtocolMetrics::Falcon(FalconMetrics {
            cooldown_days: None,
            confidence: Some(0.98),
        });
        assert_eq!(engine.score(Some(&metrics), now()).value(), 50);
    }

    #[test]
    fn test_batch_keeps_order() {
        let engine = ScoreEngine::new();
        let falcon = ProtocolMetrics::Falcon(FalconMetrics {
            cooldown_days: Some(10.0),
            confidence: None,
        });
        let scores = engine.score_batch(vec![Some(&falcon), None], now());
        assert_eq!(scores.iter().map(|s| s.value()).collect::<Vec<_>>(), vec![100, 0]);
    }
}
