use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Purpose of a one-time code, matching the `verification_code_type` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "verification_code_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationCodeType {
    #[sqlx(rename = "login_2fa")]
    #[serde(rename = "login_2fa")]
    Login2fa,
    EmailVerification,
}

impl std::fmt::Display for VerificationCodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationCodeType::Login2fa => write!(f, "login_2fa"),
            VerificationCodeType::EmailVerification => write!(f, "email_verification"),
        }
    }
}

/// Database model for an emailed one-time code
#[derive(Debug, Clone, FromRow)]
pub struct VerificationCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub code: String,
    pub code_type: VerificationCodeType,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct NewVerificationCode {
    pub user_id: Uuid,
    pub code: String,
    pub code_type: VerificationCodeType,
    pub expires_at: DateTime<Utc>,
}
