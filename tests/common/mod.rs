#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use bson::oid::ObjectId;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use veloria_backend::config::{AdminUserConfig, RateLimitConfig};
use veloria_backend::middlewares::admin_middleware::AdminAuthState;
use veloria_backend::middlewares::rate_limit_middleware::RateLimitState;
use veloria_backend::model::booking::Booking;
use veloria_backend::model::contact::ContactSubmission;
use veloria_backend::model::project::Project;
use veloria_backend::model::submission::Submission;
use veloria_backend::repository::booking_repo::{BookingFilter, BookingRepository};
use veloria_backend::repository::contact_repo::{ContactFilter, ContactRepository};
use veloria_backend::repository::project_repo::{ProjectFilter, ProjectRepository};
use veloria_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use veloria_backend::router::{api_router, AppState};
use veloria_backend::service::booking_service::BookingServiceImpl;
use veloria_backend::service::contact_service::ContactServiceImpl;
use veloria_backend::service::notification_service::Notifier;
use veloria_backend::service::project_service::ProjectServiceImpl;
use veloria_backend::util::email::EmailError;

pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, id: ObjectId);
}

macro_rules! impl_record {
    ($($ty:ty),*) => {$(
        impl Record for $ty {
            fn id(&self) -> Option<ObjectId> { self.id }
            fn set_id(&mut self, id: ObjectId) { self.id = Some(id); }
        }
    )*};
}

impl_record!(ContactSubmission, Booking, Project);

/// Insertion-ordered in-memory collection.
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore { records: Mutex::new(Vec::new()) }
    }

    pub fn all(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn create(&self, mut record: T) -> T {
        record.set_id(ObjectId::new());
        self.records.lock().unwrap().push(record.clone());
        record
    }

    fn get(&self, id: ObjectId) -> RepositoryResult<T> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == Some(id))
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("No record for ID: {}", id)))
    }

    fn update(&self, id: ObjectId, mut record: T) -> RepositoryResult<T> {
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No record to update for ID: {}", id)))?;
        record.set_id(id);
        *slot = record.clone();
        Ok(record)
    }

    fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        if records.len() == before {
            return Err(RepositoryError::not_found(format!("No record to delete for ID: {}", id)));
        }
        Ok(())
    }

    /// Newest first, like the Mongo repositories.
    fn list(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        self.records.lock().unwrap().iter().rev().filter(|r| keep(r)).cloned().collect()
    }
}

#[async_trait]
impl ContactRepository for MemoryStore<ContactSubmission> {
    async fn create(&self, contact: ContactSubmission) -> RepositoryResult<ContactSubmission> {
        Ok(MemoryStore::create(self, contact))
    }
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<ContactSubmission> {
        self.get(id)
    }
    async fn update(&self, id: ObjectId, contact: ContactSubmission) -> RepositoryResult<ContactSubmission> {
        MemoryStore::update(self, id, contact)
    }
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        MemoryStore::delete(self, id)
    }
    async fn list(&self, filter: ContactFilter) -> RepositoryResult<Vec<ContactSubmission>> {
        Ok(MemoryStore::list(self, |c| filter.status.map_or(true, |s| c.status == s)))
    }
}

#[async_trait]
impl BookingRepository for MemoryStore<Booking> {
    async fn create(&self, booking: Booking) -> RepositoryResult<Booking> {
        Ok(MemoryStore::create(self, booking))
    }
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Booking> {
        self.get(id)
    }
    async fn update(&self, id: ObjectId, booking: Booking) -> RepositoryResult<Booking> {
        MemoryStore::update(self, id, booking)
    }
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        MemoryStore::delete(self, id)
    }
    async fn list(&self, filter: BookingFilter) -> RepositoryResult<Vec<Booking>> {
        Ok(MemoryStore::list(self, |b| {
            filter.status.map_or(true, |s| b.status == s) && filter.date.as_ref().map_or(true, |d| &b.date == d)
        }))
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore<Project> {
    async fn create(&self, project: Project) -> RepositoryResult<Project> {
        Ok(MemoryStore::create(self, project))
    }
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Project> {
        self.get(id)
    }
    async fn update(&self, id: ObjectId, project: Project) -> RepositoryResult<Project> {
        MemoryStore::update(self, id, project)
    }
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        MemoryStore::delete(self, id)
    }
    async fn list(&self, filter: ProjectFilter) -> RepositoryResult<Vec<Project>> {
        Ok(MemoryStore::list(self, |p| {
            filter.status.map_or(true, |s| p.status == s)
                && filter.workflow_stage.map_or(true, |s| p.workflow_stage == Some(s))
                && filter.service_type.map_or(true, |s| p.service_type == s)
        }))
    }
}

/// Remembers every notification as `(kind, recipient)`.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_admin(&self, submission: Submission<'_>) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push((submission.kind().to_string(), "admin".to_string()));
        Ok(())
    }

    async fn confirm_user(&self, recipient: &str, submission: Submission<'_>) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push((submission.kind().to_string(), recipient.to_string()));
        Ok(())
    }
}

/// Every send fails, as with an unreachable SMTP server.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_admin(&self, _submission: Submission<'_>) -> Result<(), EmailError> {
        Err(EmailError::SmtpError("connection refused".to_string()))
    }

    async fn confirm_user(&self, _recipient: &str, _submission: Submission<'_>) -> Result<(), EmailError> {
        Err(EmailError::SmtpError("connection refused".to_string()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub contacts: Arc<MemoryStore<ContactSubmission>>,
    pub bookings: Arc<MemoryStore<Booking>>,
    pub projects: Arc<MemoryStore<Project>>,
}

pub fn setup_app() -> (TestApp, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (setup_app_with(notifier.clone(), RateLimitConfig::default()), notifier)
}

pub fn setup_app_with(notifier: Arc<dyn Notifier>, rate_limit: RateLimitConfig) -> TestApp {
    let contacts = Arc::new(MemoryStore::<ContactSubmission>::new());
    let bookings = Arc::new(MemoryStore::<Booking>::new());
    let projects = Arc::new(MemoryStore::<Project>::new());

    let state = AppState {
        contact_service: Arc::new(ContactServiceImpl::new(contacts.clone(), notifier.clone())),
        booking_service: Arc::new(BookingServiceImpl::new(bookings.clone(), notifier.clone())),
        project_service: Arc::new(ProjectServiceImpl::new(projects.clone(), notifier)),
        admin_auth_state: Arc::new(AdminAuthState::new(AdminUserConfig::from_test_env())),
        rate_limit_state: Arc::new(RateLimitState::new(&rate_limit)),
    };
    TestApp { router: api_router(state), contacts, bookings, projects }
}

pub fn strict_rate_limit(max_requests: u64) -> RateLimitConfig {
    RateLimitConfig { window_ms: Duration::from_secs(3600).as_millis() as u64, max_requests }
}

pub fn admin_auth_header() -> String {
    format!("Basic {}", STANDARD.encode("admin:changeme123"))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Sends one request; `auth` adds the admin Basic credentials.
pub async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>, auth: bool) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if auth {
        builder = builder.header("authorization", admin_auth_header());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &TestApp, request: Request<Body>) -> TestResponse {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    TestResponse { status, headers, body }
}

/// `details` of an error body, joined for substring checks.
pub fn details(body: &Value) -> String {
    body["details"]
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("; "))
        .unwrap_or_default()
}
