use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use uppye_core::authorization::{Action, ResourceKind};

use crate::api::handlers::auth::{login_handler, logout_handler, refresh_handler};
use crate::api::handlers::classrooms::{create_classroom_handler, list_classrooms_handler};
use crate::api::handlers::health::health_checker_handler;
use crate::api::handlers::users::{list_users_handler, me_handler};
use crate::api::middleware::auth::auth;
use crate::api::middleware::authorize::authorize;
use crate::app_state::SharedAppState;

pub struct ApiRoutes {}

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let authenticated_router = Router::new()
            .route(
                "/api/v1/users",
                get(list_users_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    authorize(Action::Read, ResourceKind::User),
                )),
            )
            .route("/api/v1/users/me", get(me_handler))
            .route(
                "/api/v1/classrooms",
                get(list_classrooms_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    authorize(Action::Read, ResourceKind::Classroom),
                )),
            )
            .route(
                "/api/v1/classrooms",
                post(create_classroom_handler).layer(middleware::from_fn_with_state(
                    state.clone(),
                    authorize(Action::Create, ResourceKind::Classroom),
                )),
            )
            // Authentication runs before every permission check
            .route_layer(middleware::from_fn_with_state(state.clone(), auth));

        let public_router = Router::new()
            .route("/api/v1/auth/login", post(login_handler))
            .route("/api/v1/auth/refresh", post(refresh_handler))
            .route("/api/v1/auth/logout", post(logout_handler))
            .route("/api/v1/health", get(health_checker_handler))
            .with_state(state.clone());

        Router::new()
            .merge(authenticated_router)
            .merge(public_router)
            .with_state(state.clone())
    }
}
