pub mod authorization;
pub mod error;
pub mod identity;
pub mod settings;
pub mod tokens;
pub mod utils;
