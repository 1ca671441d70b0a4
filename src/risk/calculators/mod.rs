// Protocol-specific risk calculators module
pub mod pendle;
pub mod ethena;
pub mod falcon;
pub mod liveness;

// Re-export all calculators
pub use pendle::PendleRiskCalculator;
pub use ethena::EthenaRiskCalculator;
pub use falcon::FalconRiskCalculator;
pub use liveness::LivenessCalculator;
