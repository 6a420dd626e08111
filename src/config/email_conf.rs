use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info};

use crate::config::{parsed_var, required_var, var_or, ConfigError};

/// Outgoing SMTP settings for notification e-mails.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Empty when the relay accepts unauthenticated mail
    pub smtp_username: String,
    pub smtp_password: String,
    /// Implicit TLS, or STARTTLS when `use_starttls` is also set
    pub use_tls: bool,
    pub use_starttls: bool,
    pub from_email: String,
    pub from_name: String,
    pub connection_timeout_secs: u64,
    /// Inbox that receives new-submission alerts
    pub admin_email: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("use_tls", &self.use_tls)
            .field("use_starttls", &self.use_starttls)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("admin_email", &self.admin_email)
            .finish()
    }
}

impl EmailConfig {
    /// Reads the `SMTP_*` variables and `ADMIN_NOTIFY_EMAIL`. `SMTP_HOST`
    /// and `SMTP_FROM_EMAIL` are required; a missing host means e-mail is
    /// not configured at all.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");
        let defaults = EmailConfig::default();

        let smtp_host = required_var("SMTP_HOST")?;
        let from_email = required_var("SMTP_FROM_EMAIL")?;
        let admin_email = env::var("ADMIN_NOTIFY_EMAIL").unwrap_or_else(|_| {
            debug!("ADMIN_NOTIFY_EMAIL not set, alerts go to {}", from_email);
            from_email.clone()
        });

        let config = EmailConfig {
            smtp_port: parsed_var("SMTP_PORT", defaults.smtp_port)?,
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            use_tls: parsed_var("SMTP_USE_TLS", defaults.use_tls)?,
            use_starttls: parsed_var("SMTP_USE_STARTTLS", defaults.use_starttls)?,
            from_name: var_or("SMTP_FROM_NAME", &defaults.from_name),
            connection_timeout_secs: parsed_var("SMTP_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
            smtp_host,
            from_email,
            admin_email,
        };
        debug!(config = ?config, "Email configuration");

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Local catch-all SMTP (e.g. MailHog) without TLS or auth.
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            use_tls: false,
            use_starttls: false,
            from_email: "hello@veloria.test".to_string(),
            from_name: "Veloria".to_string(),
            connection_timeout_secs: 5,
            admin_email: "admin@example.com".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.smtp_host.trim().is_empty() {
            Some("SMTP host cannot be empty")
        } else if self.smtp_port == 0 {
            Some("SMTP port cannot be 0")
        } else if !self.smtp_username.is_empty() && self.smtp_password.is_empty() {
            Some("SMTP password is required when a username is set")
        } else if !looks_like_address(&self.from_email) {
            Some("Invalid from email format")
        } else if !looks_like_address(&self.admin_email) {
            Some("Invalid admin notification email format")
        } else if self.connection_timeout_secs == 0 {
            Some("Connection timeout cannot be 0")
        } else {
            None
        };

        match problem {
            Some(message) => {
                error!("Invalid email configuration: {}", message);
                Err(ConfigError::ValidationError(message.to_string()))
            }
            None => Ok(()),
        }
    }

    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}

fn looks_like_address(value: &str) -> bool {
    matches!(value.split_once('@'), Some((local, domain)) if !local.is_empty() && domain.contains('.'))
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            use_tls: true,
            use_starttls: true,
            from_email: String::new(),
            from_name: "Veloria".to_string(),
            connection_timeout_secs: 30,
            admin_email: String::new(),
        }
    }
}
