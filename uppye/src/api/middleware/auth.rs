use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use uppye_core::error::AuthError;
use uppye_core::identity::UserDirectory;

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

/// Authentication gate for protected routes.
///
/// Verifies the bearer access token and re-reads the subject from the
/// user directory on every request, so role changes and deletions take
/// effect immediately. The resolved principal is added to the request
/// extensions for downstream middleware and handlers.
pub async fn auth(
    State(state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let auth_header = if let Some(auth_header) = auth_header {
        auth_header
    } else {
        warn!(
            "Missing Authorization header | {} {} | user_agent: {:?}",
            req.method(),
            req.uri(),
            user_agent(&req)
        );
        return Err(AuthError::Unauthenticated.into());
    };

    // Accept tokens with or without "Bearer " prefix
    let raw_token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

    let user_id = match state.token_service.verify_access(raw_token) {
        Ok(user_id) => user_id,
        Err(_) => {
            warn!(
                "Access token rejected | {} {} | user_agent: {:?}",
                req.method(),
                req.uri(),
                user_agent(&req)
            );
            return Err(AuthError::Unauthenticated.into());
        }
    };

    let user = match state.directory.find_by_id(&user_id).await? {
        Some(user) => user,
        None => {
            warn!("Access token subject {} no longer exists", user_id);
            return Err(AuthError::Unauthenticated.into());
        }
    };

    debug!("User authenticated: {} <{}>", user.id, user.email);
    req.extensions_mut().insert(user.to_principal());
    Ok(next.run(req).await)
}

fn user_agent(req: &Request) -> &str {
    req.headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
}
