pub mod currency;
pub mod reward_record;

pub use currency::*;
pub use reward_record::*;
