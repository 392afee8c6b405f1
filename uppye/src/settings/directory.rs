use serde::Deserialize;
use uuid::Uuid;

use uppye_core::authorization::InstitutionSubRole;
use uppye_core::identity::UserRecord;

/// One staff membership row. A user holds at most one active row.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InstitutionMembership {
    pub user_id: Uuid,
    pub sub_role: InstitutionSubRole,
}

/// One teacher-to-institution link row.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TeacherInstitutionLink {
    pub teacher_id: Uuid,
    pub institution_id: Uuid,
}

/// Seed data for the user directory, loaded from the configuration files.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DirectorySettings {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub institution_members: Vec<InstitutionMembership>,
    #[serde(default)]
    pub teacher_institution_links: Vec<TeacherInstitutionLink>,
}
