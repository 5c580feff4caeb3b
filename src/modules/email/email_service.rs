use minijinja::{context, Environment, Value};
use serde::Serialize;
use std::sync::Arc;

use super::{EmailMessage, EmailSender};
use crate::core::error::{AppError, Result};

const TEMPLATES: &[(&str, &str)] = &[
    (
        "login_code.html.jinja",
        include_str!("../../../templates/email/login_code.html.jinja"),
    ),
    (
        "login_code.txt.jinja",
        include_str!("../../../templates/email/login_code.txt.jinja"),
    ),
    (
        "email_verification.html.jinja",
        include_str!("../../../templates/email/email_verification.html.jinja"),
    ),
    (
        "email_verification.txt.jinja",
        include_str!("../../../templates/email/email_verification.txt.jinja"),
    ),
    (
        "contact_notification.html.jinja",
        include_str!("../../../templates/email/contact_notification.html.jinja"),
    ),
    (
        "contact_notification.txt.jinja",
        include_str!("../../../templates/email/contact_notification.txt.jinja"),
    ),
];

/// A stored attachment as listed in the owner notification
#[derive(Debug, Clone)]
pub struct NotificationAttachment {
    pub name: String,
    pub size: i64,
}

/// Contents of a contact form notification
#[derive(Debug, Clone)]
pub struct ContactNotification {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
    pub attachments: Vec<NotificationAttachment>,
}

#[derive(Serialize)]
struct AttachmentLine<'a> {
    name: &'a str,
    size_kb: i64,
}

/// Bytes to whole kilobytes, rounded to nearest
fn size_in_kb(size: i64) -> i64 {
    (size + 512) / 1024
}

/// Renders and dispatches every mail the site sends
pub struct EmailService {
    sender: Arc<dyn EmailSender>,
    env: Environment<'static>,
    contact_recipient: String,
}

impl EmailService {
    pub fn new(sender: Arc<dyn EmailSender>, contact_recipient: String) -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                AppError::Internal(format!("Failed to load email template {}: {}", name, e))
            })?;
        }

        Ok(Self {
            sender,
            env,
            contact_recipient,
        })
    }

    fn render(&self, name: &str, ctx: &Value) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| AppError::Internal(format!("Failed to render {}: {}", name, e)))
    }

    fn build(&self, to: &str, subject: String, template: &str, ctx: Value) -> Result<EmailMessage> {
        Ok(EmailMessage {
            to: to.to_string(),
            subject,
            html: self.render(&format!("{}.html.jinja", template), &ctx)?,
            text: self.render(&format!("{}.txt.jinja", template), &ctx)?,
        })
    }

    /// Send the second-factor code for an admin login
    pub async fn send_login_code(
        &self,
        to: &str,
        username: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<()> {
        let message = self.build(
            to,
            "🔐 Admin Console Login Verification Code".to_string(),
            "login_code",
            context! { username, code, ttl_minutes },
        )?;
        self.sender.send(message).await
    }

    /// Send the code that confirms a newly registered email address
    pub async fn send_email_verification(
        &self,
        to: &str,
        username: &str,
        code: &str,
        ttl_hours: u64,
    ) -> Result<()> {
        let message = self.build(
            to,
            "Confirm your email address".to_string(),
            "email_verification",
            context! { username, code, ttl_hours },
        )?;
        self.sender.send(message).await
    }

    /// Notify the site owner about a contact form submission
    pub async fn send_contact_notification(&self, notification: &ContactNotification) -> Result<()> {
        let attachments: Vec<AttachmentLine> = notification
            .attachments
            .iter()
            .map(|a| AttachmentLine {
                name: &a.name,
                size_kb: size_in_kb(a.size),
            })
            .collect();

        let message = self.build(
            &self.contact_recipient,
            format!("💼 New Contact Form Submission from {}", notification.name),
            "contact_notification",
            context! {
                name => &notification.name,
                email => &notification.email,
                company => &notification.company,
                message => &notification.message,
                attachments => Value::from_serialize(&attachments),
            },
        )?;
        self.sender.send(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::email::recording::RecordingEmailSender;

    fn service() -> (Arc<RecordingEmailSender>, EmailService) {
        let sender = Arc::new(RecordingEmailSender::default());
        let service = EmailService::new(sender.clone(), "owner@example.com".to_string()).unwrap();
        (sender, service)
    }

    #[test]
    fn test_size_in_kb_rounds_to_nearest() {
        assert_eq!(size_in_kb(0), 0);
        assert_eq!(size_in_kb(511), 0);
        assert_eq!(size_in_kb(512), 1);
        assert_eq!(size_in_kb(2048), 2);
        assert_eq!(size_in_kb(2600), 3);
    }

    #[tokio::test]
    async fn test_login_code_mail() {
        let (sender, service) = service();
        service
            .send_login_code("alice@x.com", "alice", "482913", 10)
            .await
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@x.com");
        assert!(sent[0].text.contains("Verification Code: 482913"));
        assert!(sent[0].text.contains("10 minutes"));
        assert!(sent[0].html.contains("482913"));
    }

    #[tokio::test]
    async fn test_contact_notification_lists_attachments() {
        let (sender, service) = service();
        service
            .send_contact_notification(&ContactNotification {
                name: "Bob".to_string(),
                email: "bob@x.com".to_string(),
                company: None,
                message: "Hi".to_string(),
                attachments: vec![NotificationAttachment {
                    name: "brief.txt".to_string(),
                    size: 2048,
                }],
            })
            .await
            .unwrap();

        let sent = sender.sent();
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "💼 New Contact Form Submission from Bob");
        assert!(sent[0].text.contains("Attachments (1):"));
        assert!(sent[0].text.contains("brief.txt (2KB)"));
        assert!(!sent[0].text.contains("Company:"));
    }

    #[tokio::test]
    async fn test_html_body_escapes_user_input() {
        let (sender, service) = service();
        service
            .send_contact_notification(&ContactNotification {
                name: "<script>".to_string(),
                email: "bob@x.com".to_string(),
                company: Some("Acme".to_string()),
                message: "Hi".to_string(),
                attachments: vec![],
            })
            .await
            .unwrap();

        let sent = sender.sent();
        assert!(!sent[0].html.contains("<script>"));
        assert!(sent[0].text.contains("Company: Acme"));
        assert!(sent[0].text.contains("Attachments: None"));
    }

    #[tokio::test]
    async fn test_sender_failure_is_propagated() {
        let (sender, service) = service();
        sender.set_failing(true);

        let result = service
            .send_email_verification("alice@x.com", "alice", "123456", 24)
            .await;
        assert!(matches!(result, Err(AppError::NotificationFailure(_))));
    }
}
