use crate::model::booking::{BookingStatus, CallType};
use crate::util::error::ServiceError;
use crate::util::validation::{self, trim, trim_optional};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub date: String,
    pub time: String,
    #[validate(length(min = 1, message = "timezone is required"))]
    pub timezone: String,
    pub call_type: Option<CallType>,
    #[validate(length(min = 1, message = "projectType is required"))]
    pub project_type: String,
    pub additional_info: Option<String>,
}

impl CreateBookingRequest {
    /// Trims text fields and pads a valid date and time so equal slots
    /// compare equal. Invalid values are left for `check` to report.
    pub fn normalized(self) -> Self {
        let date = validation::canonical_date(&self.date).unwrap_or_else(|| trim(self.date));
        let time = validation::canonical_time(&self.time).unwrap_or_else(|| trim(self.time));
        CreateBookingRequest {
            name: trim(self.name),
            email: trim(self.email),
            phone: trim_optional(self.phone),
            company: trim_optional(self.company),
            date,
            time,
            timezone: trim(self.timezone),
            call_type: self.call_type,
            project_type: trim(self.project_type),
            additional_info: trim_optional(self.additional_info),
        }
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = validation::validation_messages(self.validate());
        validation::check_phone("phone", self.phone.as_deref(), &mut errors);
        validation::check_date("date", &self.date, &mut errors);
        validation::check_time("time", &self.time, &mut errors);
        validation::require("callType", &self.call_type, &mut errors);
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default)]
    pub email: String,
}

/// Admin edit; any subset of fields. Changing date or time reschedules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
    pub meeting_link: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
}

impl UpdateBookingRequest {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.notes.is_none()
            && self.meeting_link.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.timezone.is_none()
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        if self.is_empty() {
            errors.push("at least one field must be provided".to_string());
        }
        if let Some(date) = &self.date {
            validation::check_date("date", date.trim(), &mut errors);
        }
        if let Some(time) = &self.time {
            validation::check_time("time", time.trim(), &mut errors);
        }
        if let Some(timezone) = &self.timezone {
            if timezone.trim().is_empty() {
                errors.push("timezone cannot be blank".to_string());
            }
        }
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub date: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: String,
    /// Times already held, ascending `HH:MM`
    pub booked_times: Vec<String>,
}
