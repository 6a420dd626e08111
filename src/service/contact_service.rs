use crate::dto::contact_dto::{ContactListQuery, CreateContactRequest, UpdateContactRequest};
use crate::dto::response::{Page, Pagination};
use crate::model::contact::{ContactStatus, ContactSubmission};
use crate::model::now_rfc3339;
use crate::model::submission::Submission;
use crate::repository::contact_repo::{ContactFilter, ContactRepository};
use crate::service::notification_service::{dispatch, Notifier};
use crate::service::{apply_notes, matches_search};
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn submit(&self, request: CreateContactRequest) -> Result<ContactSubmission, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<ContactSubmission, ServiceError>;
    async fn list(&self, query: ContactListQuery) -> Result<Page<ContactSubmission>, ServiceError>;
    async fn update(&self, id: ObjectId, request: UpdateContactRequest) -> Result<ContactSubmission, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn status_counts(&self) -> Result<BTreeMap<ContactStatus, usize>, ServiceError>;
}

pub struct ContactServiceImpl {
    pub contact_repo: Arc<dyn ContactRepository>,
    pub notifier: Arc<dyn Notifier>,
}

impl ContactServiceImpl {
    pub fn new(contact_repo: Arc<dyn ContactRepository>, notifier: Arc<dyn Notifier>) -> Self {
        ContactServiceImpl { contact_repo, notifier }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, request))]
    async fn submit(&self, request: CreateContactRequest) -> Result<ContactSubmission, ServiceError> {
        let request = request.normalized();
        request.check()?;

        let now = now_rfc3339();
        let contact = ContactSubmission {
            id: None,
            name: request.name,
            email: request.email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
            status: ContactStatus::New,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        };
        let contact = self.contact_repo.create(contact).await?;
        info!(id = ?contact.id, "Contact submission stored");

        dispatch(self.notifier.as_ref(), Submission::Contact(&contact)).await;
        Ok(contact)
    }

    async fn get(&self, id: ObjectId) -> Result<ContactSubmission, ServiceError> {
        Ok(self.contact_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ContactListQuery) -> Result<Page<ContactSubmission>, ServiceError> {
        let contacts = self.contact_repo.list(ContactFilter { status: query.status }).await?;
        let search = query.search.as_deref();
        let matching: Vec<ContactSubmission> = contacts
            .into_iter()
            .filter(|c| {
                matches_search(search, &[
                    c.name.as_str(),
                    c.email.as_str(),
                    c.subject.as_deref().unwrap_or_default(),
                    c.message.as_str(),
                ])
            })
            .collect();
        Ok(Pagination { page: query.page, limit: query.limit }.apply(matching))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update(&self, id: ObjectId, request: UpdateContactRequest) -> Result<ContactSubmission, ServiceError> {
        request.check()?;
        let mut contact = self.contact_repo.get_by_id(id).await?;
        if let Some(status) = request.status {
            contact.status = status;
        }
        apply_notes(&mut contact.notes, request.notes);
        contact.updated_at = now_rfc3339();
        let contact = self.contact_repo.update(id, contact).await?;
        info!(status = ?contact.status, "Contact submission updated");
        Ok(contact)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.contact_repo.delete(id).await?;
        info!("Contact submission deleted");
        Ok(())
    }

    async fn status_counts(&self) -> Result<BTreeMap<ContactStatus, usize>, ServiceError> {
        let contacts = self.contact_repo.list(ContactFilter::default()).await?;
        let mut counts: BTreeMap<ContactStatus, usize> = ContactStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for contact in &contacts {
            *counts.entry(contact.status).or_default() += 1;
        }
        Ok(counts)
    }
}
