use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AuthError;
use crate::settings::auth::AuthSettings;
use crate::tokens::claims::{AccessClaims, ClaimsCodec, RefreshClaims};
use crate::tokens::session::{RefreshSession, SessionStore};

/// A freshly minted access/refresh pair, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues, verifies and rotates tokens against the session store.
#[derive(Clone)]
pub struct TokenService {
    codec: ClaimsCodec,
    sessions: Arc<dyn SessionStore>,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(settings: &AuthSettings, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            codec: ClaimsCodec::new(
                &settings.access_token_secret,
                &settings.refresh_token_secret,
            ),
            sessions,
            access_ttl: settings.access_token_ttl.into(),
            refresh_ttl: settings.refresh_token_ttl.into(),
        }
    }

    /// Sign a short-lived access token for `user_id`.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.codec
            .encode_access(&AccessClaims::new(user_id, self.access_ttl))
    }

    /// Sign a refresh token with a fresh session id.
    ///
    /// The returned row is not persisted here, persisting it is the
    /// caller's step.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<RefreshSession, AuthError> {
        let session_id = Uuid::new_v4();
        let claims = RefreshClaims::new(user_id, session_id, self.refresh_ttl);
        let token = self.codec.encode_refresh(&claims)?;

        Ok(RefreshSession {
            token,
            user_id,
            session_id,
            expires_at: Utc::now() + self.refresh_ttl,
        })
    }

    /// Verify an access token, returning the subject id.
    pub fn verify_access(&self, token: &str) -> Result<Uuid, AuthError> {
        Ok(self.codec.decode_access(token)?.sub)
    }

    /// Verify a refresh token's signature and expiry only. Whether its
    /// session row still exists is checked during rotation.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        self.codec.decode_refresh(token)
    }

    /// Mint a new pair for `user_id` and persist its refresh session.
    ///
    /// This is the whole login step (after the caller has checked the
    /// credentials) and the second half of a rotation.
    pub async fn establish_session(&self, user_id: Uuid) -> Result<TokenPair, AuthError> {
        let access_token = self.issue_access_token(user_id)?;
        let session = self.issue_refresh_token(user_id)?;
        let refresh_token = session.token.clone();
        self.sessions.insert(session).await?;

        info!("Established new session for user {}", user_id);
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Exchange a refresh token for a fresh pair, consuming it.
    ///
    /// The presented token's row is taken atomically before the
    /// replacement is inserted: of two rotations racing on the same
    /// token exactly one wins, and a crash between delete and insert
    /// leaves at most a missing session, never two live ones.
    pub async fn rotate(&self, presented: &str) -> Result<TokenPair, AuthError> {
        let claims = self.verify_refresh(presented)?;

        if self.sessions.delete_by_token(presented).await?.is_none() {
            // Well-signed but no row: already spent or never stored.
            warn!("Refresh token replay detected for user {}", claims.sub);
            return Err(AuthError::TokenReused);
        }

        self.establish_session(claims.sub).await
    }

    /// Drop the session stored for `presented`, if any. Idempotent.
    pub async fn logout(&self, presented: &str) -> Result<(), AuthError> {
        if let Some(session) = self.sessions.delete_by_token(presented).await? {
            info!("User {} logged out", session.user_id);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
