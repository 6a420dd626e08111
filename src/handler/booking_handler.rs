use crate::dto::booking_dto::{
    AvailabilityQuery, BookingListQuery, CancelBookingRequest, CreateBookingRequest, UpdateBookingRequest,
};
use crate::dto::response::ApiResponse;
use crate::handler::{parse_object_id, to_api};
use crate::middlewares::admin_middleware::AdminIdentity;
use crate::service::booking_service::{BookingService, BookingServiceImpl};
use crate::util::error::HandlerError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use tracing::info;

// Public: schedule a discovery call
pub async fn create_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let booking = service.book(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Your call has been booked.", to_api(&booking)?)),
    ))
}

// Public: submitter cancels with the e-mail used to book
pub async fn cancel_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Json<CancelBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "booking")?;
    let Json(payload) = payload?;
    let booking = service.cancel(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Your booking has been cancelled.", to_api(&booking)?)))
}

pub async fn availability_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let availability = service.availability(&query.date).await?;
    Ok(Json(ApiResponse::ok(availability)))
}

pub async fn admin_create_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    info!(admin = %admin.username, "Creating booking from admin panel");
    let booking = service.create_by_admin(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Booking created", to_api(&booking)?)),
    ))
}

pub async fn list_bookings_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    query: Result<Query<BookingListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let page = service.list(query).await?;
    Ok(Json(ApiResponse::ok(to_api(&page)?)))
}

pub async fn booking_stats_handler(
    State(service): State<Arc<BookingServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let counts = service.status_counts().await?;
    Ok(Json(ApiResponse::ok(counts)))
}

pub async fn get_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "booking")?;
    let booking = service.get(id).await?;
    Ok(Json(ApiResponse::ok(to_api(&booking)?)))
}

pub async fn update_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "booking")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, "Updating booking");
    let booking = service.update(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Booking updated", to_api(&booking)?)))
}

pub async fn delete_booking_handler(
    State(service): State<Arc<BookingServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "booking")?;
    info!(admin = %admin.username, %id, "Deleting booking");
    service.delete(id).await?;
    Ok(Json(ApiResponse::<()>::message_only("Booking deleted")))
}
