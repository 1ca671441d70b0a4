pub mod settings;
pub mod validator;

pub use settings::*;
pub use validator::*;
