use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{EmailMessage, EmailSender};
use crate::core::config::EmailConfig;
use crate::core::error::{AppError, Result};

/// Request body for `POST /emails`
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Client for the Resend email API
pub struct ResendClient {
    api_key: Option<String>,
    api_url: String,
    from_address: String,
    http_client: reqwest::Client,
}

impl ResendClient {
    pub fn new(config: &EmailConfig) -> Self {
        if config.resend_api_key.is_none() {
            tracing::warn!("RESEND_API_KEY not configured - email sending is disabled");
        }

        Self {
            api_key: config.resend_api_key.clone(),
            api_url: config.resend_api_url.clone(),
            from_address: config.from_address.clone(),
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::NotificationFailure("Email sending is disabled".to_string())
        })?;

        let url = format!("{}/emails", self.api_url);
        let request_body = SendEmailRequest {
            from: &self.from_address,
            to: vec![message.to.as_str()],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        tracing::debug!("Sending email via Resend: subject={}", message.subject);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach Resend: {}", e);
                AppError::NotificationFailure("Failed to send email".to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            let sent = response.json::<SendEmailResponse>().await.map_err(|e| {
                tracing::error!("Failed to parse Resend response: {}", e);
                AppError::NotificationFailure("Failed to send email".to_string())
            })?;

            tracing::info!("Email accepted by Resend: id={}", sent.id);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("Resend API error: HTTP {} - {}", status, body);
        Err(AppError::NotificationFailure(
            "Failed to send email".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_without_api_key_is_a_notification_failure() {
        let client = ResendClient::new(&EmailConfig {
            resend_api_key: None,
            resend_api_url: "http://127.0.0.1:9".to_string(),
            from_address: "noreply@example.com".to_string(),
            contact_recipient: "owner@example.com".to_string(),
        });

        let result = client
            .send(EmailMessage {
                to: "alice@example.com".to_string(),
                subject: "Hi".to_string(),
                html: "<p>Hi</p>".to_string(),
                text: "Hi".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::NotificationFailure(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SendEmailRequest {
            from: "noreply@example.com",
            to: vec!["alice@example.com"],
            subject: "Code",
            html: "<b>1</b>",
            text: "1",
        })
        .unwrap();

        assert_eq!(body["to"], serde_json::json!(["alice@example.com"]));
        assert_eq!(body["from"], "noreply@example.com");
    }
}
