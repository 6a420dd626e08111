use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::StatusBadge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::New,
        ContactStatus::Read,
        ContactStatus::Replied,
        ContactStatus::Archived,
    ];
}

impl StatusBadge for ContactStatus {
    fn label(&self) -> &'static str {
        match self {
            ContactStatus::New => "New",
            ContactStatus::Read => "Read",
            ContactStatus::Replied => "Replied",
            ContactStatus::Archived => "Archived",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            ContactStatus::New => "blue",
            ContactStatus::Read => "yellow",
            ContactStatus::Replied => "green",
            ContactStatus::Archived => "gray",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
