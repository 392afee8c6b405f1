pub mod auth;
pub mod interval;
