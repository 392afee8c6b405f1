use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::utils::secret::MaskedSecret;

/// Claims of a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(subject: Uuid, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Claims of a long-lived, single-use refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Session id, unique per issuance
    pub sid: Uuid,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(subject: Uuid, session_id: Uuid, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject,
            sid: session_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Signs and verifies the two token kinds, HS256.
///
/// Access and refresh tokens use separate secrets, so a token of one
/// kind never verifies as the other. Stateless: expiry is checked by
/// signature validation alone, session rows are the caller's concern.
#[derive(Clone)]
pub struct ClaimsCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl ClaimsCodec {
    pub fn new(access_secret: &MaskedSecret, refresh_secret: &MaskedSecret) -> Self {
        let mut validation = Validation::default();
        // No clock skew tolerance
        validation.leeway = 0;

        Self {
            access_encoding: EncodingKey::from_secret(access_secret.expose_secret().as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.expose_secret().as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.expose_secret().as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.expose_secret().as_bytes()),
            validation,
        }
    }

    pub fn encode_access(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.access_encoding)
            .map_err(|e| AuthError::Internal(e.into()))
    }

    /// Verify signature and expiry of an access token.
    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    pub fn encode_refresh(&self, claims: &RefreshClaims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.refresh_encoding)
            .map_err(|e| AuthError::Internal(e.into()))
    }

    /// Verify signature and expiry of a refresh token. Does not consult
    /// the session store.
    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

impl std::fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimsCodec").finish_non_exhaustive()
    }
}
