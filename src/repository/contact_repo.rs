use crate::model::contact::{ContactStatus, ContactSubmission};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::{newest_first, without_id};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFilter {
    pub status: Option<ContactStatus>,
}

impl ContactFilter {
    fn to_document(self) -> RepositoryResult<Document> {
        let mut filter = doc! {};
        if let Some(status) = self.status {
            filter.insert("status", bson::to_bson(&status)?);
        }
        Ok(filter)
    }
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, contact: ContactSubmission) -> RepositoryResult<ContactSubmission>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ContactSubmission>;
    /// Replaces every field except `_id`.
    async fn update(&self, id: ObjectId, contact: ContactSubmission) -> RepositoryResult<ContactSubmission>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Matching submissions, newest first.
    async fn list(&self, filter: ContactFilter) -> RepositoryResult<Vec<ContactSubmission>>;
}

pub struct MongoContactRepository {
    collection: mongodb::Collection<ContactSubmission>,
}

impl MongoContactRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoContactRepository {
            collection: db.collection::<ContactSubmission>(collection_name),
        }
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    #[tracing::instrument(skip(self, contact), fields(email = %contact.email))]
    async fn create(&self, mut contact: ContactSubmission) -> RepositoryResult<ContactSubmission> {
        info!("Creating contact submission");
        contact.id = Some(ObjectId::new());
        match self.collection.insert_one(contact.clone(), None).await {
            Ok(_) => Ok(contact),
            Err(e) => {
                error!("Failed to create contact submission: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ContactSubmission> {
        let result = self.collection.find_one(doc! { "_id": id }, None).await;
        match result {
            Ok(Some(contact)) => Ok(contact),
            Ok(None) => Err(RepositoryError::not_found(format!("Contact not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch contact by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch contact by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, contact), fields(id = %id))]
    async fn update(&self, id: ObjectId, mut contact: ContactSubmission) -> RepositoryResult<ContactSubmission> {
        info!("Updating contact submission");
        let document = without_id(bson::to_document(&contact)?);
        let result = self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await;
        match result {
            Ok(update_result) if update_result.matched_count > 0 => {
                contact.id = Some(id);
                Ok(contact)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No contact found to update for ID: {}", id))),
            Err(e) => {
                error!("Failed to update contact: {}", e);
                Err(RepositoryError::database(format!("Failed to update contact: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting contact submission");
        let result = self.collection.delete_one(doc! { "_id": id }, None).await;
        match result {
            Ok(delete_result) if delete_result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No contact found to delete for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete contact: {}", e);
                Err(RepositoryError::database(format!("Failed to delete contact: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: ContactFilter) -> RepositoryResult<Vec<ContactSubmission>> {
        let mut cursor = self
            .collection
            .find(filter.to_document()?, newest_first())
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list contacts: {}", e)))?;
        let mut contacts = Vec::new();
        while let Some(contact) = cursor.next().await {
            match contact {
                Ok(c) => contacts.push(c),
                Err(e) => {
                    error!("Failed to deserialize contact: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize contact: {}", e)));
                }
            }
        }
        info!("Fetched {} contacts", contacts.len());
        Ok(contacts)
    }
}
