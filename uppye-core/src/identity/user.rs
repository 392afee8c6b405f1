use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::secret::MaskedSecret;

/// Platform role carried by every account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    InstitutionMember,
    Teacher,
    Student,
}

impl Role {
    /// Get all roles in display order
    pub fn all() -> Vec<Role> {
        vec![
            Role::Admin,
            Role::InstitutionMember,
            Role::Teacher,
            Role::Student,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::InstitutionMember => "institution_member",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "institution_member" => Some(Role::InstitutionMember),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// bcrypt hash of the password; `None` for accounts created through
    /// a social identity provider.
    #[serde(default)]
    pub password_hash: Option<MaskedSecret>,
}

impl UserRecord {
    pub fn to_principal(&self) -> Principal {
        Principal {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// The authenticated identity attached to a request. Derived from a
/// verified access token plus a fresh user lookup, never from cached
/// authorization state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Lookup of user accounts by the auth flows.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>>;
    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<UserRecord>>;
    async fn list(&self) -> anyhow::Result<Vec<UserRecord>>;
}
