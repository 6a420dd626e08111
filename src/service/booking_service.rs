use crate::dto::booking_dto::{
    Availability, BookingListQuery, CancelBookingRequest, CreateBookingRequest, UpdateBookingRequest,
};
use crate::dto::response::{Page, Pagination};
use crate::model::booking::{Booking, BookingStatus};
use crate::model::now_rfc3339;
use crate::model::submission::Submission;
use crate::repository::booking_repo::{BookingFilter, BookingRepository};
use crate::service::notification_service::{dispatch, Notifier};
use crate::service::{apply_notes, matches_search};
use crate::util::error::ServiceError;
use crate::util::validation;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Public booking form; notifies admin and submitter.
    async fn book(&self, request: CreateBookingRequest) -> Result<Booking, ServiceError>;
    /// Booking entered from the admin panel; no notifications.
    async fn create_by_admin(&self, request: CreateBookingRequest) -> Result<Booking, ServiceError>;
    async fn cancel(&self, id: ObjectId, request: CancelBookingRequest) -> Result<Booking, ServiceError>;
    async fn availability(&self, date: &str) -> Result<Availability, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Booking, ServiceError>;
    async fn list(&self, query: BookingListQuery) -> Result<Page<Booking>, ServiceError>;
    async fn update(&self, id: ObjectId, request: UpdateBookingRequest) -> Result<Booking, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;
    async fn status_counts(&self) -> Result<BTreeMap<BookingStatus, usize>, ServiceError>;
}

pub struct BookingServiceImpl {
    pub booking_repo: Arc<dyn BookingRepository>,
    pub notifier: Arc<dyn Notifier>,
}

impl BookingServiceImpl {
    pub fn new(booking_repo: Arc<dyn BookingRepository>, notifier: Arc<dyn Notifier>) -> Self {
        BookingServiceImpl { booking_repo, notifier }
    }

    async fn store(&self, request: CreateBookingRequest) -> Result<Booking, ServiceError> {
        let request = request.normalized();
        request.check()?;
        let call_type = request
            .call_type
            .ok_or_else(|| ServiceError::Validation(vec!["callType is required".to_string()]))?;

        self.ensure_slot_free(&request.date, &request.time, None).await?;

        let now = now_rfc3339();
        let booking = Booking {
            id: None,
            name: request.name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            date: request.date,
            time: request.time,
            timezone: request.timezone,
            call_type,
            project_type: request.project_type,
            additional_info: request.additional_info,
            status: BookingStatus::Scheduled,
            meeting_link: None,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        };
        let booking = self.booking_repo.create(booking).await?;
        info!(id = ?booking.id, date = %booking.date, time = %booking.time, "Booking stored");
        Ok(booking)
    }

    /// Fails with a conflict if another booking still holds `date` at `time`.
    async fn ensure_slot_free(&self, date: &str, time: &str, exclude: Option<ObjectId>) -> Result<(), ServiceError> {
        let filter = BookingFilter { status: None, date: Some(date.to_string()) };
        let taken = self
            .booking_repo
            .list(filter)
            .await?
            .iter()
            .any(|b| b.status.holds_slot() && b.time == time && (exclude.is_none() || b.id != exclude));
        if taken {
            warn!(date, time, "Requested slot is already booked");
            return Err(ServiceError::Conflict(format!("The slot {} {} is already booked", date, time)));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    #[instrument(skip(self, request))]
    async fn book(&self, request: CreateBookingRequest) -> Result<Booking, ServiceError> {
        let booking = self.store(request).await?;
        dispatch(self.notifier.as_ref(), Submission::Booking(&booking)).await;
        Ok(booking)
    }

    #[instrument(skip(self, request))]
    async fn create_by_admin(&self, request: CreateBookingRequest) -> Result<Booking, ServiceError> {
        self.store(request).await
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn cancel(&self, id: ObjectId, request: CancelBookingRequest) -> Result<Booking, ServiceError> {
        if request.email.trim().is_empty() {
            return Err(ServiceError::Validation(vec!["email is required".to_string()]));
        }
        let mut booking = self.booking_repo.get_by_id(id).await?;
        if !booking.email_matches(&request.email) {
            warn!("Cancellation refused, e-mail does not match booking");
            return Err(ServiceError::Forbidden("Email does not match this booking".to_string()));
        }
        if booking.status == BookingStatus::Cancelled {
            info!("Booking already cancelled");
            return Ok(booking);
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = now_rfc3339();
        let booking = self.booking_repo.update(id, booking).await?;
        info!("Booking cancelled by submitter");

        dispatch(self.notifier.as_ref(), Submission::BookingCancelled(&booking)).await;
        Ok(booking)
    }

    async fn availability(&self, date: &str) -> Result<Availability, ServiceError> {
        let date = validation::canonical_date(date).ok_or_else(|| {
            ServiceError::Validation(vec!["date must be a date in YYYY-MM-DD format".to_string()])
        })?;

        let filter = BookingFilter { status: None, date: Some(date.clone()) };
        let mut booked_times: Vec<String> = self
            .booking_repo
            .list(filter)
            .await?
            .into_iter()
            .filter(|b| b.status.holds_slot())
            .map(|b| b.time)
            .collect();
        booked_times.sort();
        booked_times.dedup();
        Ok(Availability { date, booked_times })
    }

    async fn get(&self, id: ObjectId) -> Result<Booking, ServiceError> {
        Ok(self.booking_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: BookingListQuery) -> Result<Page<Booking>, ServiceError> {
        let date = query
            .date
            .as_deref()
            .map(|d| validation::canonical_date(d).unwrap_or_else(|| d.trim().to_string()));
        let filter = BookingFilter { status: query.status, date };
        let search = query.search.as_deref();
        let matching: Vec<Booking> = self
            .booking_repo
            .list(filter)
            .await?
            .into_iter()
            .filter(|b| {
                matches_search(search, &[
                    b.name.as_str(),
                    b.email.as_str(),
                    b.company.as_deref().unwrap_or_default(),
                    b.project_type.as_str(),
                ])
            })
            .collect();
        Ok(Pagination { page: query.page, limit: query.limit }.apply(matching))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update(&self, id: ObjectId, request: UpdateBookingRequest) -> Result<Booking, ServiceError> {
        request.check()?;
        let mut booking = self.booking_repo.get_by_id(id).await?;

        let held_before = booking.status.holds_slot();
        let mut moved = false;
        if let Some(date) = request.date.as_deref().and_then(validation::canonical_date) {
            moved |= date != booking.date;
            booking.date = date;
        }
        if let Some(time) = request.time.as_deref().and_then(validation::canonical_time) {
            moved |= time != booking.time;
            booking.time = time;
        }
        if let Some(timezone) = request.timezone {
            booking.timezone = validation::trim(timezone);
        }
        match request.status {
            Some(status) => booking.status = status,
            None if moved && booking.status == BookingStatus::Scheduled => booking.status = BookingStatus::Rescheduled,
            None => {}
        }
        if let Some(link) = request.meeting_link {
            booking.meeting_link = validation::trim_optional(Some(link));
        }
        apply_notes(&mut booking.notes, request.notes);

        // Moving, or going back from cancelled/completed, must not land on a taken slot
        if booking.status.holds_slot() && (moved || !held_before) {
            self.ensure_slot_free(&booking.date, &booking.time, Some(id)).await?;
        }

        booking.updated_at = now_rfc3339();
        let booking = self.booking_repo.update(id, booking).await?;
        info!(status = ?booking.status, rescheduled = moved, "Booking updated");
        Ok(booking)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.booking_repo.delete(id).await?;
        info!("Booking deleted");
        Ok(())
    }

    async fn status_counts(&self) -> Result<BTreeMap<BookingStatus, usize>, ServiceError> {
        let bookings = self.booking_repo.list(BookingFilter::default()).await?;
        let mut counts: BTreeMap<BookingStatus, usize> = BookingStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for booking in &bookings {
            *counts.entry(booking.status).or_default() += 1;
        }
        Ok(counts)
    }
}
