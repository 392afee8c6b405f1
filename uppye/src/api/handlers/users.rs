use axum::{debug_handler, extract::State, response::IntoResponse, Extension, Json};
use uuid::Uuid;

use uppye_core::identity::{Principal, Role, UserDirectory, UserRecord};

use crate::{api::error::AppError, app_state::SharedAppState};

/// A user as exposed over the API. Credential material never leaves the
/// directory.
#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        UserSummary {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

/// List every user in the directory.
#[debug_handler]
pub async fn list_users_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.directory.list().await?;
    Ok(Json(UserListResponse {
        users: users.iter().map(UserSummary::from).collect(),
    }))
}

/// Return the authenticated caller.
#[debug_handler]
pub async fn me_handler(Extension(principal): Extension<Principal>) -> Json<UserSummary> {
    Json(UserSummary {
        id: principal.id,
        email: principal.email,
        role: principal.role,
    })
}
