//! The seam between the contact endpoint and whatever delivers submissions.

use async_trait::async_trait;
use folio_core::contact::ContactSubmission;

use crate::email::EmailError;

/// Forwards a validated contact submission to its recipient.
///
/// Implementations make a single attempt; retries are not performed.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), EmailError>;
}

/// Notifier used when SMTP is not configured: logs the submission and
/// reports success so the form stays usable in local development.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn send_contact(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        tracing::warn!(
            name = %submission.full_name(),
            email = %submission.email,
            service_type = submission.service_type.as_str(),
            message_len = submission.message.chars().count(),
            "SMTP not configured; contact submission logged only",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::contact::validate_contact;

    use super::*;

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let input = serde_json::json!({
            "firstName": "Jo",
            "lastName": "Doe",
            "email": "jo@x.com",
            "serviceType": "other",
            "message": "Just saying hello"
        });
        let submission = validate_contact(input.as_object().unwrap()).unwrap();
        assert!(LogNotifier.send_contact(&submission).await.is_ok());
    }
}
