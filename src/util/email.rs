use crate::config::{ConfigError, EmailConfig};
use crate::util::email_template::RenderedEmail;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, instrument};

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),

    #[error("Email delivery is disabled")]
    Disabled,
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// Sends rendered templates through one pooled SMTP transport.
pub struct SmtpEmailService {
    pub config: EmailConfig,
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    #[instrument(skip(config), fields(server = %config.get_smtp_url()))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");
        config.validate()?;

        let from = parse_mailbox(&format!("{} <{}>", config.from_name, config.from_email))?;

        let tls = if config.use_tls {
            let parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;
            if config.use_starttls {
                Tls::Required(parameters)
            } else {
                Tls::Wrapper(parameters)
            }
        } else {
            Tls::None
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
            .port(config.smtp_port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)))
            .tls(tls);
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!("SMTP email service initialized");
        Ok(Self { config, from, transport: builder.build() })
    }

    /// Inbox that receives admin alerts.
    pub fn admin_address(&self) -> &str {
        &self.config.admin_email
    }

    /// Single delivery attempt, no retry.
    #[instrument(skip(self, email), fields(to = %to, subject = %email.subject))]
    pub async fn send(&self, to: &str, email: RenderedEmail) -> Result<(), EmailError> {
        let message = build_message(self.from.clone(), parse_mailbox(to)?, email)?;
        self.transport.send(message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;
        info!("Email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|e| EmailError::AddressError(format!("Invalid address {:?}: {}", address, e)))
}

/// Text and HTML alternatives of the same template.
fn build_message(from: Mailbox, to: Mailbox, email: RenderedEmail) -> Result<Message, EmailError> {
    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject)
        .multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(email.text))
                .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(email.html)),
        )
        .map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> RenderedEmail {
        RenderedEmail {
            subject: "Hello".to_string(),
            text: "plain".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[test]
    fn test_parse_mailbox() {
        assert!(parse_mailbox("Veloria <hello@veloria.test>").is_ok());
        assert!(parse_mailbox("ana@example.com").is_ok());
        assert!(matches!(parse_mailbox("not-an-address"), Err(EmailError::AddressError(_))));
    }

    #[test]
    fn test_build_message_has_both_alternatives() {
        let from = parse_mailbox("Veloria <hello@veloria.test>").unwrap();
        let to = parse_mailbox("ana@example.com").unwrap();
        let message = build_message(from, to, rendered()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("Subject: Hello"));
    }

    #[tokio::test]
    async fn test_service_rejects_invalid_config() {
        let mut config = EmailConfig::from_test_env();
        config.smtp_host = String::new();
        assert!(matches!(SmtpEmailService::new(config), Err(EmailError::ConfigError(_))));
    }
}
