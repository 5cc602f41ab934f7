//! SMTP delivery via the `lettre` async transport.
//!
//! Configuration is loaded from environment variables; if the `SEND_EMAIL`
//! toggle is off or `SMTP_HOST` is not set, [`EmailConfig::from_env`]
//! returns `None` and no mailer should be constructed — notification is
//! then skipped entirely, which is not an error.

use std::path::PathBuf;
use std::time::Duration;

use inscription_db::models::inscription::Inscription;

use crate::summary;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// An attachment could not be read from disk.
    #[error("Attachment read error: {0}")]
    Attachment(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@institut.local";

/// Default socket timeout applied to connection, greeting, and transfer.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the SMTP notification mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" mailbox (display name allowed).
    pub from_address: String,
    /// Administrative mailbox receiving the summaries.
    pub admin_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
    /// Bound on the SMTP socket (connection, greeting, transfer).
    pub timeout: Duration,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` unless `SEND_EMAIL=true` and `SMTP_HOST` is set,
    /// signalling that notification is disabled and must be skipped.
    ///
    /// | Variable            | Required | Default                   |
    /// |---------------------|----------|---------------------------|
    /// | `SEND_EMAIL`        | yes      | — (must be `true`)        |
    /// | `SMTP_HOST`         | yes      | —                         |
    /// | `SMTP_PORT`         | no       | `587`                     |
    /// | `SMTP_FROM`         | no       | `noreply@institut.local`  |
    /// | `ADMIN_EMAIL`       | no       | falls back to `SMTP_FROM` |
    /// | `SMTP_USER`         | no       | —                         |
    /// | `SMTP_PASSWORD`     | no       | —                         |
    /// | `SMTP_TIMEOUT_SECS` | no       | `5`                       |
    pub fn from_env() -> Option<Self> {
        let enabled = std::env::var("SEND_EMAIL").is_ok_and(|v| v == "true");
        if !enabled {
            return None;
        }
        let smtp_host = std::env::var("SMTP_HOST").ok()?;

        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        let admin_address =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| from_address.clone());

        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address,
            admin_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            timeout: Duration::from_secs(
                std::env::var("SMTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// A stored upload to attach to the notification, under its original
/// submitted filename.
#[derive(Debug, Clone)]
pub struct AttachmentFile {
    pub filename: String,
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// NotificationMailer
// ---------------------------------------------------------------------------

/// Sends the new-inscription summary to the administrative mailbox.
pub struct NotificationMailer {
    config: EmailConfig,
}

impl NotificationMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the summary email for a persisted inscription, attaching the
    /// files uploaded with it. At most one attempt is made per call.
    pub async fn deliver(
        &self,
        inscription: &Inscription,
        attachments: &[AttachmentFile],
    ) -> Result<(), EmailError> {
        use lettre::message::header::ContentType;
        use lettre::message::{Attachment, MultiPart, SinglePart};
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

        let (subject, html) = summary::compose(inscription);

        let mut body = MultiPart::mixed().singlepart(SinglePart::html(html));
        for attachment in attachments {
            let bytes = tokio::fs::read(&attachment.path).await?;
            let mime = mime_guess::from_path(&attachment.filename).first_or_octet_stream();
            let content_type = ContentType::parse(mime.essence_str())
                .map_err(|e| EmailError::Build(e.to_string()))?;
            body = body.singlepart(
                Attachment::new(attachment.filename.clone()).body(bytes, content_type),
            );
        }

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.admin_address.parse()?)
            .subject(subject)
            .multipart(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .timeout(Some(self.config.timeout));

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            to = %self.config.admin_address,
            inscription_id = inscription.id,
            attachments = attachments.len(),
            "Notification email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_send_email_toggle() {
        // Ensure the toggle is not set in the test environment.
        std::env::remove_var("SEND_EMAIL");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
