use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::StatusBadge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Rescheduled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Scheduled,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Rescheduled,
    ];

    /// Whether a booking in this status still occupies its time slot.
    pub fn holds_slot(&self) -> bool {
        matches!(self, BookingStatus::Scheduled | BookingStatus::Rescheduled)
    }
}

impl StatusBadge for BookingStatus {
    fn label(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "Scheduled",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Rescheduled => "Rescheduled",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            BookingStatus::Scheduled => "blue",
            BookingStatus::Completed => "green",
            BookingStatus::Cancelled => "red",
            BookingStatus::Rescheduled => "yellow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Video,
    Phone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time in `timezone`, `HH:MM`
    pub time: String,
    pub timezone: String,
    pub call_type: CallType,
    pub project_type: String,
    pub additional_info: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    /// Booking e-mails are compared ignoring case and surrounding whitespace.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}
