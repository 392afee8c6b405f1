use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use uppye_core::identity::Principal;

use crate::{
    api::error::AppError,
    app_state::SharedAppState,
    services::classrooms::Classroom,
};

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct CreateClassroomRequest {
    pub name: String,
}

/// List all classrooms.
#[debug_handler]
pub async fn list_classrooms_handler(
    State(state): State<SharedAppState>,
) -> Result<impl IntoResponse, AppError> {
    let classrooms = state.classrooms.get_classrooms().await;
    Ok(Json(classrooms))
}

/// Create a classroom owned by the caller.
#[debug_handler]
pub async fn create_classroom_handler(
    State(state): State<SharedAppState>,
    Extension(principal): Extension<Principal>,
    Json(form): Json<CreateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let classroom = Classroom {
        id: Uuid::new_v4(),
        name: form.name,
        created_by: principal.id,
    };
    state.classrooms.add_classroom(classroom.clone()).await?;

    info!("Classroom {} created by {}", classroom.id, principal.email);
    Ok((StatusCode::CREATED, Json(classroom)))
}
