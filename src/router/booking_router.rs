use crate::handler::booking_handler::{
    admin_create_booking_handler, availability_handler, booking_stats_handler, cancel_booking_handler,
    create_booking_handler, delete_booking_handler, get_booking_handler, list_bookings_handler,
    update_booking_handler,
};
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};
use crate::middlewares::rate_limit_middleware::{rate_limit, RateLimitState};
use crate::service::booking_service::BookingServiceImpl;
use axum::{middleware, routing::{get, patch, post}, Router};
use std::sync::Arc;

pub fn booking_router(
    service: Arc<BookingServiceImpl>,
    admin_auth_state: Arc<AdminAuthState>,
    rate_limit_state: Arc<RateLimitState>,
) -> Router {
    // Public routes
    let public = Router::new()
        .route("/api/bookings", post(create_booking_handler))
        .route("/api/bookings/availability", get(availability_handler))
        .route("/api/bookings/cancel/{id}", patch(cancel_booking_handler))
        .route_layer(middleware::from_fn_with_state(rate_limit_state, rate_limit));

    // Admin-protected routes
    let admin = Router::new()
        .route("/admin/bookings", get(list_bookings_handler).post(admin_create_booking_handler))
        .route("/admin/bookings/stats", get(booking_stats_handler))
        .route(
            "/admin/bookings/{id}",
            get(get_booking_handler).patch(update_booking_handler).delete(delete_booking_handler),
        )
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public.merge(admin).with_state(service)
}
