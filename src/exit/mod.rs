// Exit comparison: NAV redemption after cooldown vs. immediate market sale

pub mod comparator;
pub mod config;
pub mod models;

pub use comparator::ExitComparator;
pub use config::{DepegScenarios, ExitConfig};
pub use models::*;
