use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use uppye_core::authorization::{InstitutionSubRole, MembershipResolver};
use uppye_core::identity::{UserDirectory, UserRecord};

use crate::settings::directory::{DirectorySettings, InstitutionMembership, TeacherInstitutionLink};

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<Uuid, UserRecord>,
    institution_members: Vec<InstitutionMembership>,
    teacher_institution_links: Vec<TeacherInstitutionLink>,
}

/// User accounts and membership rows, seeded from the configuration.
///
/// Serves both as the user directory and as the source of tenant facts
/// for authorization. Lookups always read the current state, so changes
/// made at runtime are visible to the next request.
#[derive(Debug, Clone)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDirectory {
    pub fn new() -> InMemoryDirectory {
        InMemoryDirectory {
            state: Arc::new(RwLock::new(DirectoryState::default())),
        }
    }

    pub fn from_settings(settings: &DirectorySettings) -> InMemoryDirectory {
        let state = DirectoryState {
            users: settings
                .users
                .iter()
                .map(|user| (user.id, user.clone()))
                .collect(),
            institution_members: settings.institution_members.clone(),
            teacher_institution_links: settings.teacher_institution_links.clone(),
        };
        InMemoryDirectory {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn add_user(&self, user: UserRecord) {
        self.state.write().await.users.insert(user.id, user);
    }

    pub async fn add_institution_membership(&self, membership: InstitutionMembership) {
        self.state
            .write()
            .await
            .institution_members
            .push(membership);
    }

    pub async fn add_teacher_link(&self, link: TeacherInstitutionLink) {
        self.state
            .write()
            .await
            .teacher_institution_links
            .push(link);
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> anyhow::Result<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.users.get(id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }
}

#[async_trait]
impl MembershipResolver for InMemoryDirectory {
    async fn institution_sub_role(
        &self,
        user_id: &Uuid,
    ) -> anyhow::Result<Option<InstitutionSubRole>> {
        let state = self.state.read().await;
        Ok(state
            .institution_members
            .iter()
            .find(|m| &m.user_id == user_id)
            .map(|m| m.sub_role))
    }

    async fn is_linked_to_institution(&self, user_id: &Uuid) -> anyhow::Result<bool> {
        let state = self.state.read().await;
        Ok(state
            .teacher_institution_links
            .iter()
            .any(|l| &l.teacher_id == user_id))
    }

    async fn linked_institution_count(&self, user_id: &Uuid) -> anyhow::Result<usize> {
        let state = self.state.read().await;
        Ok(state
            .teacher_institution_links
            .iter()
            .filter(|l| &l.teacher_id == user_id)
            .count())
    }
}
