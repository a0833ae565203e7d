//! Outgoing mail over SMTP via lettre.
//!
//! Handlers only see the `Mailer` trait so delivery can be disabled when no
//! SMTP account is configured, and swapped out in tests.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

use crate::config::MailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// A plain-text message ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MailError>> + Send + 'a>>;

/// Something that can deliver an `OutgoingEmail`
pub trait Mailer: Send + Sync {
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> SendFuture<'a>;

    /// False when sending is a no-op
    fn is_enabled(&self) -> bool {
        true
    }
}

/// SMTP delivery for production.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server)
        };
        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from_address: config.default_sender.clone(),
        })
    }

    async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| MailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|_| MailError::InvalidAddress(email.to.clone()))?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?;

        self.transport.send(message).await?;

        tracing::info!(subject = %email.subject, "Email sent successfully");
        Ok(())
    }
}

impl Mailer for SmtpMailer {
    fn send<'a>(&'a self, email: &'a OutgoingEmail) -> SendFuture<'a> {
        Box::pin(self.deliver(email))
    }
}

/// Used when no SMTP account is configured. Sends nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

impl Mailer for DisabledMailer {
    fn send<'a>(&'a self, _email: &'a OutgoingEmail) -> SendFuture<'a> {
        Box::pin(async { Ok(()) })
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_config(use_tls: bool) -> MailConfig {
        MailConfig {
            server: "localhost".into(),
            port: 2525,
            use_tls,
            username: "user".into(),
            password: "secret".into(),
            default_sender: "noreply@oasishotel.com".into(),
            timeout_secs: 1,
        }
    }

    #[tokio::test]
    async fn test_smtp_mailer_builds_without_connecting() {
        assert!(SmtpMailer::new(&mail_config(false)).is_ok());
        assert!(SmtpMailer::new(&mail_config(true)).is_ok());
    }

    #[tokio::test]
    async fn test_disabled_mailer_is_noop() {
        let email = OutgoingEmail {
            to: "guest@example.com".into(),
            subject: "Hi".into(),
            body: "Body".into(),
        };
        assert!(!DisabledMailer.is_enabled());
        assert!(DisabledMailer.send(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_sending() {
        let mailer = SmtpMailer::new(&mail_config(false)).unwrap();
        let email = OutgoingEmail {
            to: "not an address".into(),
            subject: "Hi".into(),
            body: "Body".into(),
        };
        assert!(matches!(mailer.send(&email).await, Err(MailError::InvalidAddress(_))));
    }
}
