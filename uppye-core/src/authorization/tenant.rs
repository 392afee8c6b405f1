use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Role;

/// Sub-role of an `institution_member` account inside its institution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionSubRole {
    Admin,
    Secretary,
    Finance,
}

impl InstitutionSubRole {
    /// Get all sub-roles in display order
    pub fn all() -> Vec<InstitutionSubRole> {
        vec![
            InstitutionSubRole::Admin,
            InstitutionSubRole::Secretary,
            InstitutionSubRole::Finance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionSubRole::Admin => "admin",
            InstitutionSubRole::Secretary => "secretary",
            InstitutionSubRole::Finance => "finance",
        }
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<InstitutionSubRole> {
        match s.to_lowercase().as_str() {
            "admin" => Some(InstitutionSubRole::Admin),
            "secretary" => Some(InstitutionSubRole::Secretary),
            "finance" => Some(InstitutionSubRole::Finance),
            _ => None,
        }
    }
}

/// Source of per-institution membership facts.
#[async_trait]
pub trait MembershipResolver: Send + Sync {
    /// Sub-role of the user inside their institution, if they are staff.
    async fn institution_sub_role(
        &self,
        user_id: &Uuid,
    ) -> anyhow::Result<Option<InstitutionSubRole>>;

    /// Whether the user is linked to at least one institution.
    async fn is_linked_to_institution(&self, user_id: &Uuid) -> anyhow::Result<bool>;

    /// Number of institutions the user is linked to.
    async fn linked_institution_count(&self, user_id: &Uuid) -> anyhow::Result<usize>;
}

/// Tenant facts consumed by the ability rules.
///
/// Resolved fresh for every request from the membership data, never
/// cached across requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TenantContext {
    pub institution_sub_role: Option<InstitutionSubRole>,
    pub is_linked_to_institution: bool,
    pub remaining_classroom_quota: bool,
}

impl TenantContext {
    /// Resolve the tenant facts relevant to `role`.
    ///
    /// Only the lookups the role's ability rules consume are performed:
    /// institution members need their sub-role, teachers their
    /// institution links. Admins and students need no lookup at all.
    pub async fn resolve(
        role: Role,
        resolver: &dyn MembershipResolver,
        user_id: &Uuid,
    ) -> anyhow::Result<Self> {
        match role {
            Role::InstitutionMember => Ok(Self {
                institution_sub_role: resolver.institution_sub_role(user_id).await?,
                ..Self::default()
            }),
            Role::Teacher => {
                let is_linked = resolver.is_linked_to_institution(user_id).await?;
                // Spare quota exists only while the teacher is linked to
                // no institution at all.
                let remaining_quota = resolver.linked_institution_count(user_id).await? < 1;
                Ok(Self {
                    institution_sub_role: None,
                    is_linked_to_institution: is_linked,
                    remaining_classroom_quota: remaining_quota,
                })
            }
            Role::Admin | Role::Student => Ok(Self::default()),
        }
    }
}
