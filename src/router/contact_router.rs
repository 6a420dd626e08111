use crate::handler::contact_handler::{
    contact_stats_handler, delete_contact_handler, get_contact_handler, list_contacts_handler,
    submit_contact_handler, update_contact_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::rate_limit_middleware::{rate_limit, RateLimitState};
use crate::service::contact_service::ContactServiceImpl;
use axum::{middleware, routing::{get, post}, Router};
use std::sync::Arc;

pub fn contact_router(
    service: Arc<ContactServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
    rate_limit_state: Arc<RateLimitState>,
) -> Router {
    // Public route
    let public = Router::new()
        .route("/api/contact", post(submit_contact_handler))
        .route_layer(middleware::from_fn_with_state(rate_limit_state, rate_limit));

    // Admin-protected routes
    let admin = Router::new()
        .route("/admin/contacts", get(list_contacts_handler))
        .route("/admin/contacts/stats", get(contact_stats_handler))
        .route(
            "/admin/contacts/{id}",
            get(get_contact_handler).patch(update_contact_handler).delete(delete_contact_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
