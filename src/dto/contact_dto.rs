use crate::model::contact::ContactStatus;
use crate::util::error::ServiceError;
use crate::util::validation::{self, trim, trim_optional};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateContactRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

impl CreateContactRequest {
    pub fn normalized(self) -> Self {
        CreateContactRequest {
            name: trim(self.name),
            email: trim(self.email),
            phone: trim_optional(self.phone),
            subject: trim_optional(self.subject),
            message: trim(self.message),
        }
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = validation::validation_messages(self.validate());
        validation::check_phone("phone", self.phone.as_deref(), &mut errors);
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub status: Option<ContactStatus>,
    /// Blank clears the notes
    pub notes: Option<String>,
}

impl UpdateContactRequest {
    pub fn check(&self) -> Result<(), ServiceError> {
        if self.status.is_none() && self.notes.is_none() {
            return Err(ServiceError::Validation(vec!["at least one of status or notes is required".to_string()]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListQuery {
    pub status: Option<ContactStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
