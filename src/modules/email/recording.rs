//! Test sender that records messages instead of delivering them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{EmailMessage, EmailSender};
use crate::core::error::{AppError, Result};

#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl RecordingEmailSender {
    /// Make every subsequent send fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::NotificationFailure(
                "Failed to send email".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
