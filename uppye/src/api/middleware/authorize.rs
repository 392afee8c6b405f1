use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use uppye_core::authorization::{resolve_capabilities, Action, ResourceKind, TenantContext};
use uppye_core::error::AuthError;
use uppye_core::identity::Principal;

use crate::api::error::AppError;
use crate::app_state::SharedAppState;

/// Middleware factory that creates permission-checking middleware for a route.
///
/// Tenant facts are resolved fresh on every request and never cached, so
/// membership changes apply to the next call. On success the computed
/// capability set is added to the request extensions.
pub fn authorize(
    action: Action,
    resource: ResourceKind,
) -> impl Fn(
    State<SharedAppState>,
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>,
> + Clone {
    move |State(state): State<SharedAppState>, mut req: Request, next: Next| {
        Box::pin(async move {
            let principal: Principal = match req.extensions().get::<Principal>() {
                Some(principal) => principal.clone(),
                None => {
                    warn!("Permission check reached without an authenticated principal");
                    return Err(AuthError::Unauthenticated.into());
                }
            };

            let tenant_ctx =
                TenantContext::resolve(principal.role, state.directory.as_ref(), &principal.id)
                    .await?;
            let capabilities = resolve_capabilities(principal.role, &tenant_ctx);

            if !capabilities.can(action, resource) {
                warn!(
                    "Access denied: {} ({}) may not {} {}",
                    principal.email,
                    principal.role.as_str(),
                    action.as_str(),
                    resource.as_str()
                );
                return Err(AuthError::Forbidden.into());
            }

            info!(
                "Access granted: {} ({}) may {} {}",
                principal.email,
                principal.role.as_str(),
                action.as_str(),
                resource.as_str()
            );

            req.extensions_mut().insert(capabilities);
            Ok(next.run(req).await)
        })
    }
}
