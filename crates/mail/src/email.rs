//! Contact notification emails via SMTP.
//!
//! [`SmtpNotifier`] wraps the `lettre` async SMTP transport and sends one
//! plain-text email per validated contact submission. Configuration is loaded
//! from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no SMTP notifier should be
//! constructed.

use async_trait::async_trait;
use folio_core::contact::ContactSubmission;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::notifier::ContactNotifier;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
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
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@folio.local";

/// Configuration for the SMTP contact notifier.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Mailbox that receives contact submissions.
    pub contact_inbox: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      |                         |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `noreply@folio.local`   |
    /// | `CONTACT_INBOX` | no       | value of `SMTP_FROM`    |
    /// | `SMTP_USER`     | no       |                         |
    /// | `SMTP_PASSWORD` | no       |                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            contact_inbox: std::env::var("CONTACT_INBOX").unwrap_or_else(|_| from_address.clone()),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message composition
// ---------------------------------------------------------------------------

/// Subject line for a contact notification.
pub fn contact_subject(submission: &ContactSubmission) -> String {
    format!(
        "New {} enquiry from {}",
        submission.service_type.label(),
        submission.full_name()
    )
}

/// Plain-text body listing every provided field.
pub fn render_contact_body(submission: &ContactSubmission) -> String {
    let mut lines = vec![
        format!("Name: {}", submission.full_name()),
        format!("Email: {}", submission.email),
    ];
    if let Some(phone) = &submission.phone {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(company) = &submission.company {
        lines.push(format!("Company: {company}"));
    }
    lines.push(format!("Service: {}", submission.service_type.label()));
    if let Some(title) = &submission.project_title {
        lines.push(format!("Project: {title}"));
    }
    if let Some(timeline) = submission.timeline {
        lines.push(format!("Timeline: {}", timeline.label()));
    }
    lines.push(String::new());
    lines.push(submission.message.clone());
    lines.join("\n")
}

/// Assemble the notification email. Replies go straight to the visitor.
pub fn build_contact_message(
    config: &EmailConfig,
    submission: &ContactSubmission,
) -> Result<Message, EmailError> {
    let reply_to = Mailbox::new(
        Some(submission.full_name()),
        submission.email.parse::<Address>()?,
    );

    Message::builder()
        .from(config.from_address.parse()?)
        .reply_to(reply_to)
        .to(config.contact_inbox.parse()?)
        .subject(contact_subject(submission))
        .header(ContentType::TEXT_PLAIN)
        .body(render_contact_body(submission))
        .map_err(|e| EmailError::Build(e.to_string()))
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends contact notifications through an SMTP relay.
pub struct SmtpNotifier {
    config: EmailConfig,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Build the STARTTLS transport for the configured relay.
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            mailer: transport_builder.build(),
            config,
        })
    }
}

#[async_trait]
impl ContactNotifier for SmtpNotifier {
    async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let email = build_contact_message(&self.config, submission)?;
        self.mailer.send(email).await?;

        tracing::info!(
            service_type = submission.service_type.as_str(),
            inbox = %self.config.contact_inbox,
            "Contact notification email sent",
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
