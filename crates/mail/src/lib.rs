//! Delivery of contact form submissions.
//!
//! Provides the [`ContactNotifier`] trait used by the API layer, an SMTP
//! implementation, and a log-only fallback for environments without SMTP.

pub mod email;
pub mod notifier;

pub use email::{EmailConfig, EmailError, SmtpNotifier};
pub use notifier::{ContactNotifier, LogNotifier};
