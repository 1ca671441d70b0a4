// Liveness penalty shared by every protocol
// Stale or low-confidence data sources make any score less trustworthy

use crate::risk::thresholds::{max_penalty, penalty_below, ScoringConfig, Tier};

#[derive(Debug, Clone)]
pub struct LivenessCalculator {
    tiers: Vec<Tier>,
}

impl LivenessCalculator {
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            tiers: config.liveness_tiers.clone(),
        }
    }

    /// No confidence reported means no penalty. NaN is treated as dead data.
    pub fn penalty(&self, confidence: Option<f64>) -> f64 {
        match confidence {
            None => 0.0,
            Some(c) if c.is_nan() => max_penalty(&self.tiers),
            Some(c) => penalty_below(c.min(1.0), &self.tiers),
        }
    }
}

impl Default for LivenessCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_tiers() {
        let liveness = LivenessCalculator::new();
        assert_eq!(liveness.penalty(Some(0.5)), 30.0);
        assert_eq!(liveness.penalty(Some(0.8)), 15.0);
        assert_eq!(liveness.penalty(Some(0.9)), 5.0);
        assert_eq!(liveness.penalty(Some(0.95)), 0.0);
        assert_eq!(liveness.penalty(Some(1.4)), 0.0);
        assert_eq!(liveness.penalty(Some(-0.2)), 30.0);
    }

    #[test]
    fn test_missing_and_nan_confidence() {
        let liveness = LivenessCalculator::new();
        assert_eq!(liveness.penalty(None), 0.0);
        assert_eq!(liveness.penalty(Some(f64::NAN)), 30.0);
    }
}
