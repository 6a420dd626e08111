use crate::model::booking::{Booking, BookingStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::{newest_first, without_id};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    /// Exact `YYYY-MM-DD` match
    pub date: Option<String>,
}

impl BookingFilter {
    fn to_document(&self) -> RepositoryResult<Document> {
        let mut filter = doc! {};
        if let Some(status) = self.status {
            filter.insert("status", bson::to_bson(&status)?);
        }
        if let Some(date) = &self.date {
            filter.insert("date", date.as_str());
        }
        Ok(filter)
    }
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> RepositoryResult<Booking>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Booking>;
    /// Replaces every field except `_id`.
    async fn update(&self, id: ObjectId, booking: Booking) -> RepositoryResult<Booking>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Matching bookings, newest first.
    async fn list(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>>;
}

pub struct MongoBookingRepository {
    collection: mongodb::Collection<Booking>,
}

impl MongoBookingRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoBookingRepository {
            collection: db.collection::<Booking>(collection_name),
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[tracing::instrument(skip(self, booking), fields(date = %booking.date, time = %booking.time))]
    async fn create(&self, mut booking: Booking) -> RepositoryResult<Booking> {
        info!("Creating booking");
        booking.id = Some(ObjectId::new());
        match self.collection.insert_one(booking.clone(), None).await {
            Ok(_) => Ok(booking),
            Err(e) => {
                error!("Failed to create booking: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Booking> {
        match self.collection.find_one(doc! { "_id": id }, None).await {
            Ok(Some(booking)) => Ok(booking),
            Ok(None) => Err(RepositoryError::not_found(format!("Booking not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch booking by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch booking by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, booking), fields(id = %id, status = ?booking.status))]
    async fn update(&self, id: ObjectId, mut booking: Booking) -> RepositoryResult<Booking> {
        info!("Updating booking");
        let document = without_id(bson::to_document(&booking)?);
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                booking.id = Some(id);
                Ok(booking)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No booking found to update for ID: {}", id))),
            Err(e) => {
                error!("Failed to update booking: {}", e);
                Err(RepositoryError::database(format!("Failed to update booking: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting booking");
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(delete_result) if delete_result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No booking found to delete for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete booking: {}", e);
                Err(RepositoryError::database(format!("Failed to delete booking: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>> {
        let mut cursor = self
            .collection
            .find(filter.to_document()?, newest_first())
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list bookings: {}", e)))?;
        let mut bookings = Vec::new();
        while let Some(booking) = cursor.next().await {
            match booking {
                Ok(b) => bookings.push(b),
                Err(e) => {
                    error!("Failed to deserialize booking: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize booking: {}", e)));
                }
            }
        }
        Ok(bookings)
    }
}
