//! SMTP delivery of submission notices.

use async_trait::async_trait;
use award_core::{validate_smtp_config, Config, EmailContent};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("No valid recipient addresses")]
    NoRecipients,

    #[error("Invalid sender address: {0}")]
    InvalidSender(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Sends a composed email to a list of recipients.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &[String], content: &EmailContent) -> Result<(), MailError>;
}

/// Mailer backed by an SMTP relay.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Create email service from config. Returns `None` when SMTP settings are incomplete.
    pub fn from_config(config: &Config) -> Option<Self> {
        let check = validate_smtp_config(|key| match key {
            "SMTP_HOST" => config.smtp_host().map(String::from),
            "SMTP_PORT" => config.smtp_port().map(|port| port.to_string()),
            "SMTP_USER" => config.smtp_user().map(String::from),
            "SMTP_PASS" => config.smtp_password().map(String::from),
            _ => None,
        });
        if !check.ok {
            tracing::warn!(
                missing = %check.missing.join(","),
                "SMTP settings incomplete, mail delivery disabled"
            );
            return None;
        }

        let host = config.smtp_host()?;
        let user = config.smtp_user()?;
        let password = config.smtp_password()?;
        let from = config.smtp_from().unwrap_or(user).to_string();
        let port = config.smtp_port()?;
        let credentials = Credentials::new(user.to_string(), password.to_string());

        let mailer = if config.smtp_tls() {
            let builder = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
                Ok(builder) => builder,
                Err(e) => {
                    tracing::error!(host = %host, error = %e, "Invalid SMTP relay");
                    return None;
                }
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP with STARTTLS)");
            builder.port(port).credentials(credentials).build()
        } else {
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(port)
                .credentials(credentials)
                .build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    fn build_message(&self, to: &[String], content: &EmailContent) -> Result<Message, MailError> {
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect();
        if to_addrs.is_empty() {
            return Err(MailError::NoRecipients);
        }
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| MailError::InvalidSender(format!("{}: {}", self.from, e)))?;

        let mut builder = Message::builder()
            .from(from_addr)
            .subject(content.subject.as_str());
        for mailbox in to_addrs {
            builder = builder.to(mailbox);
        }
        builder
            .header(ContentType::TEXT_PLAIN)
            .body(content.text.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, to: &[String], content: &EmailContent) -> Result<(), MailError> {
        let message = self.build_message(to, content)?;
        self.mailer
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        tracing::info!(recipients = to.len(), "Submission email sent");
        Ok(())
    }
}
