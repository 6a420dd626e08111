pub mod booking_handler;
pub mod contact_handler;
pub mod project_handler;

use crate::dto::response::api_json;
use crate::util::error::{HandlerError, HandlerErrorKind};
use bson::oid::ObjectId;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

pub(crate) fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|_| HandlerError::bad_request(format!("Invalid {} id", what)))
}

/// Record as API JSON, with `_id` exposed as `id`.
pub(crate) fn to_api<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    api_json(value).map_err(|e| {
        error!("Failed to serialize response: {}", e);
        HandlerError::new(HandlerErrorKind::Internal, "Internal server error")
    })
}
