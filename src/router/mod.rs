pub mod booking_router;
pub mod contact_router;
pub mod project_router;

use crate::middlewares::admin_middleware::AdminAuthState;
use crate::middlewares::rate_limit_middleware::RateLimitState;
use crate::service::booking_service::BookingServiceImpl;
use crate::service::contact_service::ContactServiceImpl;
use crate::service::project_service::ProjectServiceImpl;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Shared services and middleware state the routers are built from.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: Arc<ContactServiceImpl>,
    pub booking_service: Arc<BookingServiceImpl>,
    pub project_service: Arc<ProjectServiceImpl>,
    pub admin_auth_state: Arc<AdminAuthState>,
    pub rate_limit_state: Arc<RateLimitState>,
}

/// Every route of the API, without the outer HTTP layers.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(contact_router::contact_router(
            state.contact_service,
            state.admin_auth_state.clone(),
            state.rate_limit_state.clone(),
        ))
        .merge(booking_router::booking_router(
            state.booking_service,
            state.admin_auth_state.clone(),
            state.rate_limit_state.clone(),
        ))
        .merge(project_router::project_router(
            state.project_service,
            state.admin_auth_state,
            state.rate_limit_state,
        ))
        .route("/health", get(|| async { "OK" }))
}
