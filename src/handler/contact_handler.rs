use crate::dto::contact_dto::{ContactListQuery, CreateContactRequest, UpdateContactRequest};
use crate::dto::response::ApiResponse;
use crate::handler::{parse_object_id, to_api};
use crate::middlewares::admin_middleware::AdminIdentity;
use crate::service::contact_service::{ContactService, ContactServiceImpl};
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

// Public: contact form
pub async fn submit_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let contact = service.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Thank you for your message. We'll get back to you soon.", to_api(&contact)?)),
    ))
}

pub async fn list_contacts_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    query: Result<Query<ContactListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let page = service.list(query).await?;
    Ok(Json(ApiResponse::ok(to_api(&page)?)))
}

pub async fn contact_stats_handler(
    State(service): State<Arc<ContactServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let counts = service.status_counts().await?;
    Ok(Json(ApiResponse::ok(counts)))
}

pub async fn get_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "contact")?;
    let contact = service.get(id).await?;
    Ok(Json(ApiResponse::ok(to_api(&contact)?)))
}

pub async fn update_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "contact")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, "Updating contact submission");
    let contact = service.update(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Contact updated", to_api(&contact)?)))
}

pub async fn delete_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "contact")?;
    info!(admin = %admin.username, %id, "Deleting contact submission");
    service.delete(id).await?;
    Ok(Json(ApiResponse::<()>::message_only("Contact deleted")))
}
