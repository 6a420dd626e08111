use crate::dto::project_dto::{
    CreateProjectRequest, MilestonesRequest, PaymentScheduleRequest, ProjectListQuery, UpdateMilestoneStatusRequest,
    UpdatePaymentStatusRequest, UpdateProjectRequest,
};
use crate::dto::response::ApiResponse;
use crate::handler::{parse_object_id, to_api};
use crate::middlewares::admin_middleware::AdminIdentity;
use crate::service::project_service::{ProjectService, ProjectServiceImpl};
use crate::util::error::HandlerError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use tracing::info;

// Public: project request form
pub async fn submit_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let project = service.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Thank you! Your project request has been received.", to_api(&project)?)),
    ))
}

pub async fn list_projects_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    query: Result<Query<ProjectListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Query(query) = query?;
    let page = service.list(query).await?;
    Ok(Json(ApiResponse::ok(to_api(&page)?)))
}

pub async fn project_stats_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn get_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    let project = service.get(id).await?;
    Ok(Json(ApiResponse::ok(to_api(&project)?)))
}

pub async fn update_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, "Updating project");
    let project = service.update(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Project updated", to_api(&project)?)))
}

pub async fn delete_project_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    info!(admin = %admin.username, %id, "Deleting project");
    service.delete(id).await?;
    Ok(Json(ApiResponse::<()>::message_only("Project deleted")))
}

pub async fn replace_payments_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentScheduleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, "Replacing payment schedule");
    let project = service.replace_payment_schedule(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Payment schedule updated", to_api(&project)?)))
}

pub async fn update_payment_status_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    path: Result<Path<(String, usize)>, PathRejection>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((id, index)) = path?;
    let id = parse_object_id(&id, "project")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, index, status = ?payload.status, "Updating payment status");
    let project = service.update_payment_status(id, index, payload.status).await?;
    Ok(Json(ApiResponse::with_message("Payment status updated", to_api(&project)?)))
}

pub async fn replace_milestones_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<String>,
    payload: Result<Json<MilestonesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "project")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, "Replacing milestones");
    let project = service.replace_milestones(id, payload).await?;
    Ok(Json(ApiResponse::with_message("Milestones updated", to_api(&project)?)))
}

pub async fn update_milestone_status_handler(
    State(service): State<Arc<ProjectServiceImpl>>,
    Extension(admin): Extension<AdminIdentity>,
    path: Result<Path<(String, usize)>, PathRejection>,
    payload: Result<Json<UpdateMilestoneStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((id, index)) = path?;
    let id = parse_object_id(&id, "project")?;
    let Json(payload) = payload?;
    info!(admin = %admin.username, %id, index, status = ?payload.status, "Updating milestone status");
    let project = service.update_milestone_status(id, index, payload.status).await?;
    Ok(Json(ApiResponse::with_message("Milestone status updated", to_api(&project)?)))
}
