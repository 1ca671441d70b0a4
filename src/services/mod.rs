pub mod export_service;
pub mod monitoring_service;
pub mod reward_ledger;
pub mod snapshot;

pub use export_service::*;
pub use monitoring_service::*;
pub use reward_ledger::*;
pub use snapshot::*;
