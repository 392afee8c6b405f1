use axum::http::StatusCode;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use uppye_core::error::AuthError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn get_error_msg(&self) -> (axum::http::StatusCode, String) {
        let status: axum::http::StatusCode = match self {
            AppError::Auth(auth_error) => match auth_error {
                AuthError::Forbidden => StatusCode::FORBIDDEN,
                AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::Unauthenticated
                | AuthError::InvalidToken
                | AuthError::TokenReused
                | AuthError::InvalidCredentials
                | AuthError::SocialLoginOnly => StatusCode::UNAUTHORIZED,
            },
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<AuthError>() {
            Ok(auth_error) => AppError::Auth(auth_error),
            Err(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.get_error_msg();
        let body = serde_json::json!({ "error": true, "message": body });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_reuse_is_indistinguishable_from_invalid_token() {
        let (reused_status, reused_msg) =
            AppError::Auth(AuthError::TokenReused).get_error_msg();
        let (invalid_status, invalid_msg) =
            AppError::Auth(AuthError::InvalidToken).get_error_msg();

        assert_eq!(reused_status, StatusCode::UNAUTHORIZED);
        assert_eq!(reused_status, invalid_status);
        assert_eq!(reused_msg, invalid_msg);
    }

    #[test]
    fn test_anyhow_round_trip_keeps_auth_errors() {
        let wrapped: anyhow::Error = AuthError::Forbidden.into();
        let app_error: AppError = wrapped.into();

        let (status, _) = app_error.get_error_msg();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_other_anyhow_errors_become_internal() {
        let wrapped = anyhow::anyhow!("store exploded");
        let app_error: AppError = wrapped.into();

        let (status, msg) = app_error.get_error_msg();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(msg.contains("store exploded"));
    }
}
