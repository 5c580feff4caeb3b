//! In-memory repositories used by service and router tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use super::{SessionRepository, UserRepository, VerificationCodeRepository};
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{
    NewSession, NewUser, NewVerificationCode, Session, User, VerificationCode,
    VerificationCodeType,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn create_first(&self, new_user: NewUser) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if !users.is_empty() {
            return Ok(None);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password: new_user.password_hash,
            is_admin: new_user.is_admin,
            email_verified: false,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
        user.email_verified = true;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[derive(Default)]
pub struct InMemoryVerificationCodeRepository {
    codes: Mutex<Vec<VerificationCode>>,
}

impl InMemoryVerificationCodeRepository {
    /// Latest code of the given type issued to the user, used or not
    pub fn latest_code(&self, user_id: Uuid, code_type: VerificationCodeType) -> Option<String> {
        self.codes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.user_id == user_id && c.code_type == code_type)
            .map(|c| c.code.clone())
    }

    /// Move every code of the user into the past
    pub fn expire_all(&self, user_id: Uuid) {
        let past = Utc::now() - chrono::Duration::seconds(1);
        for code in self
            .codes
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|c| c.user_id == user_id)
        {
            code.expires_at = past;
        }
    }
}

#[async_trait]
impl VerificationCodeRepository for InMemoryVerificationCodeRepository {
    async fn create(&self, new_code: NewVerificationCode) -> Result<VerificationCode> {
        let code = VerificationCode {
            id: Uuid::new_v4(),
            user_id: new_code.user_id,
            code: new_code.code,
            code_type: new_code.code_type,
            expires_at: new_code.expires_at,
            used: false,
            created_at: Utc::now(),
        };
        self.codes.lock().unwrap().push(code.clone());
        Ok(code)
    }

    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
        code_type: VerificationCodeType,
    ) -> Result<Option<VerificationCode>> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| {
                c.user_id == user_id && c.code == code && c.code_type == code_type && !c.used
            })
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool> {
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id && !c.used) {
            Some(code) => {
                code.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.expires_at > now);
        Ok((before - codes.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepository {
    pub fn all(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }

    /// Move every session into the past
    pub fn expire_all(&self) {
        let past = Utc::now() - chrono::Duration::seconds(1);
        for session in self.sessions.lock().unwrap().iter_mut() {
            session.expires_at = past;
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            token_hash: new_session.token_hash,
            user_id: new_session.user_id,
            pending_user_id: new_session.pending_user_id,
            expires_at: new_session.expires_at,
            created_at: now,
            updated_at: now,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn find_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token_hash == token_hash && s.expires_at > now)
            .cloned())
    }

    async fn set_pending_user(&self, id: Uuid, user_id: Uuid) -> Result<Session> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))?;
        session.pending_user_id = Some(user_id);
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    async fn complete_login(
        &self,
        id: Uuid,
        user_id: Uuid,
        new_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))?;
        session.user_id = Some(user_id);
        session.pending_user_id = None;
        session.token_hash = new_token_hash.to_string();
        session.expires_at = expires_at;
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.sessions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
