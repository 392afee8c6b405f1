//! Uppye auth service library
//!
//! This library exposes the server internals for integration testing.
//! Most functionality is in the binary, but we expose router creation
//! and the application state for E2E testing.

// Internal modules
pub mod api;
pub mod app_state;
pub mod http;
pub mod logging;
pub mod services;
pub mod settings;
pub mod stop_flag;
pub mod sweeper;

// Re-export commonly used types for tests
pub use app_state::AppState;
