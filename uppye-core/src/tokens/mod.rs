//! Token lifecycle: signing, verification, rotation and session storage.

pub mod claims;
pub mod service;
pub mod session;

pub use claims::{AccessClaims, ClaimsCodec, RefreshClaims};
pub use service::{TokenPair, TokenService};
pub use session::{InMemorySessionStore, RefreshSession, SessionStore};
