use crate::model::submission::Submission;
use crate::util::email::{EmailError, SmtpEmailService};
use crate::util::email_template;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Outbound notifications for stored submissions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Alert to the admin inbox.
    async fn notify_admin(&self, submission: Submission<'_>) -> Result<(), EmailError>;
    /// Confirmation to the person who submitted.
    async fn confirm_user(&self, recipient: &str, submission: Submission<'_>) -> Result<(), EmailError>;
}

pub struct EmailNotifier {
    email: SmtpEmailService,
}

impl EmailNotifier {
    pub fn new(email: SmtpEmailService) -> Self {
        EmailNotifier { email }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify_admin(&self, submission: Submission<'_>) -> Result<(), EmailError> {
        let message = email_template::admin_alert(submission);
        self.email.send(self.email.admin_address(), message).await
    }

    async fn confirm_user(&self, recipient: &str, submission: Submission<'_>) -> Result<(), EmailError> {
        let message = email_template::user_confirmation(submission);
        self.email.send(recipient, message).await
    }
}

/// Used when SMTP is not configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify_admin(&self, _submission: Submission<'_>) -> Result<(), EmailError> {
        Err(EmailError::Disabled)
    }

    async fn confirm_user(&self, _recipient: &str, _submission: Submission<'_>) -> Result<(), EmailError> {
        Err(EmailError::Disabled)
    }
}

/// Sends the admin alert and the user confirmation. Failures are logged
/// and never reach the caller.
pub async fn dispatch(notifier: &dyn Notifier, submission: Submission<'_>) {
    let kind = submission.kind();
    match notifier.notify_admin(submission).await {
        Ok(()) => info!(kind, "Admin notification sent"),
        Err(EmailError::Disabled) => debug!(kind, "Email disabled, admin notification skipped"),
        Err(e) => warn!(kind, "Admin notification failed: {}", e),
    }
    match notifier.confirm_user(submission.submitter_email(), submission).await {
        Ok(()) => info!(kind, "User confirmation sent"),
        Err(EmailError::Disabled) => debug!(kind, "Email disabled, user confirmation skipped"),
        Err(e) => warn!(kind, "User confirmation failed: {}", e),
    }
}
