use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
    TooManyRequests,
}

impl HandlerErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::Forbidden => "Forbidden",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::TooManyRequests => "TooManyRequests",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<Vec<String>>,
}

impl HandlerError {
    pub fn new<T: Into<String>>(error: HandlerErrorKind, message: T) -> Self {
        HandlerError { error, message: message.into(), details: None }
    }

    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::BadRequest, message)
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::new(HandlerErrorKind::NotFound, message)
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

/// Wire shape of every error response.
#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    kind: HandlerErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [String]>,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: &self.message,
            kind: self.error,
            details: self.details.as_deref(),
        };
        (self.error.status_code(), axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        HandlerError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for HandlerError {
    fn from(rejection: QueryRejection) -> Self {
        HandlerError::bad_request(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for HandlerError {
    fn from(rejection: PathRejection) -> Self {
        HandlerError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("Not Found: {0}")]
    NotFound(String),
    /// One message per offending field
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("Invalid Input: {0}")]
    InvalidInput(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::InvalidQuery(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
            RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => HandlerError::not_found(msg),
            ServiceError::Validation(details) => HandlerError {
                error: HandlerErrorKind::Validation,
                message: "Validation failed".to_string(),
                details: Some(details),
            },
            ServiceError::InvalidInput(msg) => HandlerError::bad_request(msg),
            ServiceError::Forbidden(msg) => HandlerError::new(HandlerErrorKind::Forbidden, msg),
            ServiceError::Conflict(msg) => HandlerError::new(HandlerErrorKind::Conflict, msg),
            ServiceError::InternalError(msg) => {
                // Details stay in the logs
                error!("Internal error while handling request: {}", msg);
                HandlerError::new(HandlerErrorKind::Internal, "Internal server error")
            }
        }
    }
}
