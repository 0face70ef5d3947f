//! Outgoing mail: SMTP through lettre, or a log-only transport when no SMTP
//! host is configured.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::{self, MailConfig};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address {address}: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    pub fn password_reset(to: &str, reset_url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Password reset token".to_string(),
            body: format!(
                "You are receiving this email because you (or someone else) has requested the reset of a password.\n\n\
                 Please make a POST request to:\n\n{}\n\n\
                 If you did not request this, you can safely ignore this email.",
                reset_url
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// Handle shared with handlers through a request extension.
pub type SharedMailer = Arc<dyn Mailer>;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &MailConfig, host: &str) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(settings.smtp_port);
        if let (Some(user), Some(pass)) = (&settings.smtp_user, &settings.smtp_pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self { transport: builder.build(), from: from_mailbox(settings)? })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = build_message(&self.from, &mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let reply = response.message().collect::<Vec<_>>().join(" ");
        tracing::info!(to = %mail.to, reply = %reply, "Message sent");
        Ok(())
    }
}

/// Used when `SMTP_HOST` is unset: the message is logged instead of sent.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        tracing::info!(to = %mail.to, subject = %mail.subject, body = %mail.body, "SMTP not configured, mail logged only");
        Ok(())
    }
}

fn from_mailbox(settings: &MailConfig) -> Result<Mailbox, MailError> {
    let raw = format!("\"{}\" <{}>", settings.from_name, settings.from_mail);
    raw.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: raw.clone(),
        reason: e.to_string(),
    })
}

fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, MailError> {
    let to: Mailbox = mail.to.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: mail.to.clone(),
        reason: e.to_string(),
    })?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

/// Pick the transport from configuration.
pub fn mailer_from_config() -> Result<SharedMailer, MailError> {
    let settings = &config::config().mail;
    match settings.smtp_host.as_deref() {
        Some(host) if !host.is_empty() => {
            tracing::info!("SMTP mailer configured for {}:{}", host, settings.smtp_port);
            Ok(Arc::new(SmtpMailer::new(settings, host)?))
        }
        _ => {
            tracing::warn!("SMTP_HOST not set, outgoing mail will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MailConfig {
        MailConfig {
            smtp_host: Some("localhost".into()),
            smtp_port: 2525,
            smtp_user: None,
            smtp_pass: None,
            from_name: "Shop".into(),
            from_mail: "noreply@shop.test".into(),
        }
    }

    #[test]
    fn from_header_carries_name_and_address() {
        let from = from_mailbox(&settings()).unwrap();
        assert_eq!(from.name.as_deref(), Some("Shop"));
        assert_eq!(from.email.to_string(), "noreply@shop.test");
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let from = from_mailbox(&settings()).unwrap();
        let mail = OutgoingMail { to: "nobody".into(), subject: "s".into(), body: "b".into() };
        assert!(matches!(build_message(&from, &mail), Err(MailError::Address { .. })));
    }

    #[test]
    fn reset_mail_contains_link() {
        let mail = OutgoingMail::password_reset("jane@example.com", "http://localhost/api/v1/auth/reset-password/abc");
        assert!(mail.body.contains("/reset-password/abc"));
        let from = from_mailbox(&settings()).unwrap();
        assert!(build_message(&from, &mail).is_ok());
    }

    #[test]
    fn smtp_transport_builds_lazily() {
        assert!(SmtpMailer::new(&settings(), "localhost").is_ok());
    }

    #[tokio::test]
    async fn log_mailer_always_succeeds() {
        let mail = OutgoingMail { to: "jane@example.com".into(), subject: "hi".into(), body: "hello".into() };
        assert!(LogMailer.send(mail).await.is_ok());
    }
}
