// PulseScore output types
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::risk::{MAX_RISK_SCORE, MIN_RISK_SCORE};

/// Bounded 0-100 score, higher is safer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Clamp a raw score into [0, 100] and round to the nearest integer. NaN maps to 0.
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::MIN;
        }
        RiskScore(raw.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE).round() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn status(&self) -> RiskStatus {
        RiskStatus::from_score(*self)
    }
}

impl From<u8> for RiskScore {
    fn from(value: u8) -> Self {
        RiskScore(value.min(100))
    }
}

impl From<RiskScore> for u8 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Safe,
    Monitor,
    Warning,
    Critical,
}

impl RiskStatus {
    pub fn from_score(score: RiskScore) -> Self {
        match score.value() {
            75.. => RiskStatus::Safe,
            50..=74 => RiskStatus::Monitor,
            25..=49 => RiskStatus::Warning,
            _ => RiskStatus::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskStatus::Safe => "Safe",
            RiskStatus::Monitor => "Monitor",
            RiskStatus::Warning => "Warning",
            RiskStatus::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-factor penalties behind a score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub temporal_penalty: f64,
    pub depeg_penalty: f64,
    pub liveness_penalty: f64,
    pub score: RiskScore,
}

impl ScoreBreakdown {
    /// Breakdown for a snapshot that never arrived
    pub fn missing() -> Self {
        Self {
            temporal_penalty: 0.0,
            depeg_penalty: 0.0,
            liveness_penalty: 0.0,
            score: RiskScore::MIN,
        }
    }

    pub fn total_penalty(&self) -> f64 {
        self.temporal_penalty + self.depeg_penalty + self.liveness_penalty
    }

    pub fn status(&self) -> RiskStatus {
        self.score.status()
    }
}
