//! Outbound email
//!
//! [`EmailSender`] is the transport seam; [`ResendClient`] delivers through the
//! Resend HTTP API. [`EmailService`] renders the message templates.

mod email_service;
mod resend_client;

#[cfg(test)]
pub mod recording;

use async_trait::async_trait;

use crate::core::error::Result;

pub use email_service::{ContactNotification, EmailService, NotificationAttachment};
pub use resend_client::ResendClient;

/// A fully rendered message
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Delivers rendered messages. Failures surface as `NotificationFailure`.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}
