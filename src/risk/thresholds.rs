// Penalty tiers for the additive PulseScore model
use serde::{Deserialize, Serialize};

/// One step of a penalty ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub bound: f64,
    pub penalty: f64,
}

impl Tier {
    pub const fn new(bound: f64, penalty: f64) -> Self {
        Self { bound, penalty }
    }
}

/// Penalty of the first tier whose bound is strictly greater than `value`.
///
/// Tiers are ordered most severe first, so a value sitting exactly on a
/// bound falls through to the next, lighter tier.
pub fn penalty_below(value: f64, tiers: &[Tier]) -> f64 {
    tiers
        .iter()
        .find(|tier| value < tier.bound)
        .map(|tier| tier.penalty)
        .unwrap_or(0.0)
}

/// Penalty of the first tier whose bound is strictly less than `value`.
pub fn penalty_above(value: f64, tiers: &[Tier]) -> f64 {
    tiers
        .iter()
        .find(|tier| value > tier.bound)
        .map(|tier| tier.penalty)
        .unwrap_or(0.0)
}

/// Largest penalty a ladder can hand out
pub fn max_penalty(tiers: &[Tier]) -> f64 {
    tiers.iter().map(|tier| tier.penalty).fold(0.0, f64::max)
}

/// Immutable scoring parameters shared by the protocol calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Whole days to Pendle maturity
    pub maturity_tiers: Vec<Tier>,
    /// Falcon redemption cooldown in days
    pub cooldown_tiers: Vec<Tier>,
    /// Absolute Ethena funding rate
    pub funding_rate_tiers: Vec<Tier>,
    /// Ethena de-peg risk
    pub depeg_risk_tiers: Vec<Tier>,
    /// Data-source confidence
    pub liveness_tiers: Vec<Tier>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            maturity_tiers: vec![Tier::new(1.0, 30.0), Tier::new(3.0, 20.0), Tier::new(7.0, 10.0)],
            cooldown_tiers: vec![Tier::new(3.0, 25.0), Tier::new(5.0, 15.0), Tier::new(7.0, 5.0)],
            funding_rate_tiers: vec![Tier::new(0.05, 20.0), Tier::new(0.02, 10.0)],
            depeg_risk_tiers: vec![Tier::new(0.02, 15.0), Tier::new(0.01, 8.0)],
            liveness_tiers: vec![Tier::new(0.8, 30.0), Tier::new(0.9, 15.0), Tier::new(0.95, 5.0)],
        }
    }
}
