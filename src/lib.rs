pub mod config;
pub mod error;
pub mod exit;
pub mod models;
pub mod risk;
pub mod services;
pub mod utils;

pub use error::types::*;
