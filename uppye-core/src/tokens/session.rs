use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One currently valid refresh token.
///
/// Rows are never mutated in place: rotation deletes the presented
/// token's row and inserts a fresh one (new token, new session id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshSession {
    pub token: String,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Persistence of refresh sessions, keyed by the exact token string.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    async fn insert(&self, session: RefreshSession) -> anyhow::Result<()>;

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<RefreshSession>>;

    /// Remove the session stored for `token` and return it.
    ///
    /// Take-and-return must be a single atomic step: of two concurrent
    /// callers presenting the same token, exactly one receives the row,
    /// the other gets `None`.
    async fn delete_by_token(&self, token: &str) -> anyhow::Result<Option<RefreshSession>>;

    /// Purge all sessions that expired before `cutoff`, returning how
    /// many rows were removed.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<usize>;

    /// Number of live sessions held by one user.
    async fn count_for_user(&self, user_id: &Uuid) -> anyhow::Result<usize>;
}

pub type SessionHashMap = HashMap<String, RefreshSession>;

/// Session store backed by a shared in-memory map.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<SessionHashMap>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> InMemorySessionStore {
        InMemorySessionStore {
            sessions: Arc::new(RwLock::new(SessionHashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        let t = self.sessions.read().await;
        t.len()
    }

    pub async fn is_empty(&self) -> bool {
        let t = self.sessions.read().await;
        t.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: RefreshSession) -> anyhow::Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<RefreshSession>> {
        let t = self.sessions.read().await;
        Ok(t.get(token).cloned())
    }

    async fn delete_by_token(&self, token: &str) -> anyhow::Result<Option<RefreshSession>> {
        // A single remove under the write lock, so concurrent callers
        // cannot both see the row.
        Ok(self.sessions.write().await.remove(token))
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<usize> {
        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();
        sessions.retain(|_, session| session.expires_at > cutoff);
        Ok(initial_count - sessions.len())
    }

    async fn count_for_user(&self, user_id: &Uuid) -> anyhow::Result<usize> {
        let t = self.sessions.read().await;
        Ok(t.values().filter(|s| &s.user_id == user_id).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session(user_id: Uuid, token: &str, expires_in: chrono::Duration) -> RefreshSession {
        RefreshSession {
            token: token.to_string(),
            user_id,
            session_id: Uuid::new_v4(),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_session() {
        let store = InMemorySessionStore::new();
        let user_id = Uuid::new_v4();
        let session = make_session(user_id, "token-1", chrono::Duration::days(7));

        store.insert(session.clone()).await.unwrap();

        let found = store.find_by_token("token-1").await.unwrap();
        assert_eq!(found, Some(session));
        assert!(store.find_by_token("token-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_token_yields_the_row_exactly_once() {
        let store = InMemorySessionStore::new();
        let session = make_session(Uuid::new_v4(), "token-1", chrono::Duration::days(7));
        store.insert(session.clone()).await.unwrap();

        let first = store.delete_by_token("token-1").await.unwrap();
        let second = store.delete_by_token("token-1").await.unwrap();

        assert_eq!(first, Some(session));
        assert_eq!(second, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_expired_before_keeps_live_sessions() {
        let store = InMemorySessionStore::new();
        let user_id = Uuid::new_v4();

        store
            .insert(make_session(user_id, "expired", chrono::Duration::seconds(-60)))
            .await
            .unwrap();
        store
            .insert(make_session(user_id, "live", chrono::Duration::seconds(600)))
            .await
            .unwrap();

        let removed = store.delete_expired_before(Utc::now()).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.find_by_token("expired").await.unwrap().is_none());
        assert!(store.find_by_token("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_count_for_user_ignores_other_users() {
        let store = InMemorySessionStore::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        store
            .insert(make_session(user_a, "a-1", chrono::Duration::days(1)))
            .await
            .unwrap();
        store
            .insert(make_session(user_a, "a-2", chrono::Duration::days(1)))
            .await
            .unwrap();
        store
            .insert(make_session(user_b, "b-1", chrono::Duration::days(1)))
            .await
            .unwrap();

        assert_eq!(store.count_for_user(&user_a).await.unwrap(), 2);
        assert_eq!(store.count_for_user(&user_b).await.unwrap(), 1);
        assert_eq!(store.len().await, 3);
    }
}
