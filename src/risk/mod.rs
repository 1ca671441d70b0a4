// PulseScore risk module
// Protocol-specific penalty calculators and the engine that combines them

pub mod errors;
pub mod metrics;
pub mod score;
pub mod thresholds;
pub mod traits;
pub mod calculators;
pub mod engine;

// Re-export main types
pub use errors::*;
pub use metrics::*;
pub use score::*;
pub use thresholds::{ScoringConfig, Tier};
pub use traits::*;
pub use calculators::*;
pub use engine::ScoreEngine;

// Risk calculation constants
pub const MAX_RISK_SCORE: f64 = 100.0;
pub const MIN_RISK_SCORE: f64 = 0.0;
