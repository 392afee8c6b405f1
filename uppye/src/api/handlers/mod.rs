pub mod auth;
pub mod classrooms;
pub mod health;
pub mod users;
