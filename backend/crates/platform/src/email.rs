//! Email Delivery Abstraction
//!
//! The activation flow enqueues a best-effort send at registration: a
//! failure is detected and logged, but the registration (and its
//! activation code) is not rolled back. The default sender for local dev
//! is [`LogEmailSender`], which logs the message and returns `Ok`.

use thiserror::Error;

/// An email to deliver
#[derive(Clone, Debug)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Email delivery errors
#[derive(Debug, Error)]
pub enum EmailError {
    /// Delivery failed at the provider
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

/// Email delivery abstraction
///
/// The sender decides how to deliver (SMTP, API, etc.) and returns
/// `Ok`/`Err`.
pub trait EmailSender: Send + Sync {
    /// Deliver a message or return an error
    fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

/// Local dev sender that logs the payload instead of sending real email
#[derive(Clone, Debug, Default)]
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "email send stub"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sender_always_succeeds() {
        let sender = LogEmailSender;
        let message = EmailMessage {
            to: "a@x.com".to_string(),
            subject: "Activate your account".to_string(),
            body: "Your activation code is ABC123".to_string(),
        };
        assert!(sender.send(&message).is_ok());
    }
}
