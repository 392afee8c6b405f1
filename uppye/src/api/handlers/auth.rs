use axum::{debug_handler, extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, warn};

use uppye_core::error::AuthError;
use uppye_core::identity::UserDirectory;
use uppye_core::tokens::TokenPair;

use crate::{api::error::AppError, app_state::SharedAppState};

#[derive(Debug, serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Verify email and password, then open a fresh session.
#[debug_handler]
pub async fn login_handler(
    State(state): State<SharedAppState>,
    Json(form): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt for {}", form.email);

    let user = match state.directory.find_by_email(&form.email).await? {
        Some(user) => user,
        None => {
            warn!("Login attempt for unknown email {}", form.email);
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let password_hash = match &user.password_hash {
        Some(password_hash) => password_hash,
        // Accounts provisioned through a social provider carry no hash.
        None => return Err(AuthError::SocialLoginOnly.into()),
    };

    let password_matches = bcrypt::verify(&form.password, password_hash.expose_secret())
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if !password_matches {
        warn!("Invalid password for user {}", user.id);
        return Err(AuthError::InvalidCredentials.into());
    }

    let token_pair = state.token_service.establish_session(user.id).await?;
    Ok(Json(token_pair))
}

/// Exchange a refresh token for a new token pair, invalidating the old one.
#[debug_handler]
pub async fn refresh_handler(
    State(state): State<SharedAppState>,
    Json(form): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let token_pair = state.token_service.rotate(&form.refresh_token).await?;
    Ok(Json(token_pair))
}

/// End the session the refresh token belongs to. Succeeds even if the
/// token is already gone.
#[debug_handler]
pub async fn logout_handler(
    State(state): State<SharedAppState>,
    Json(form): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.token_service.logout(&form.refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
