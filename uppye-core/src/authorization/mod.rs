//! Role and tenant based authorization.
//!
//! The capability model is a flat allow matrix over action and resource
//! kind, computed per request from the principal's role and fresh tenant
//! membership facts.

pub mod ability;
pub mod permission;
pub mod tenant;

pub use ability::{resolve_capabilities, CapabilitySet};
pub use permission::{Action, ResourceKind};
pub use tenant::{InstitutionSubRole, MembershipResolver, TenantContext};
