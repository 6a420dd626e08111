use crate::handler::project_handler::{
    delete_project_handler, get_project_handler, list_projects_handler, project_stats_handler,
    replace_milestones_handler, replace_payments_handler, submit_project_handler, update_milestone_status_handler,
    update_payment_status_handler, update_project_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::rate_limit_middleware::{rate_limit, RateLimitState};
use crate::service::project_service::ProjectServiceImpl;
use axum::{middleware, routing::{get, patch, post, put}, Router};
use std::sync::Arc;

pub fn project_router(
    service: Arc<ProjectServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
    rate_limit_state: Arc<RateLimitState>,
) -> Router {
    // Public route
    let public = Router::new()
        .route("/api/projects", post(submit_project_handler))
        .route_layer(middleware::from_fn_with_state(rate_limit_state, rate_limit));

    // Admin-protected routes
    let admin = Router::new()
        .route("/admin/projects", get(list_projects_handler))
        .route("/admin/projects/stats", get(project_stats_handler))
        .route(
            "/admin/projects/{id}",
            get(get_project_handler).patch(update_project_handler).delete(delete_project_handler),
        )
        .route("/admin/projects/{id}/payments", put(replace_payments_handler))
        .route("/admin/projects/{id}/payments/{index}", patch(update_payment_status_handler))
        .route("/admin/projects/{id}/milestones", put(replace_milestones_handler))
        .route("/admin/projects/{id}/milestones/{index}", patch(update_milestone_status_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
