pub mod user;

pub use user::{Principal, Role, UserDirectory, UserRecord};
