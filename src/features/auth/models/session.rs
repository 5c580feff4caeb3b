use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::AuthenticatedUser;

/// Database model for a browser session
///
/// A session is either anonymous, waiting for a 2FA code (`pending_user_id`),
/// or bound to a user (`user_id`).
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub token_hash: String,
    pub user_id: Option<Uuid>,
    pub pending_user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: Option<Uuid>,
    pub pending_user_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
}

/// Per-request view of the caller's session, resolved by the session middleware
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub session: Option<Session>,
    pub user: Option<AuthenticatedUser>,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn pending_user_id(&self) -> Option<Uuid> {
        self.session.as_ref().and_then(|s| s.pending_user_id)
    }
}
