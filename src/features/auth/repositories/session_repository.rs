use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{NewSession, Session};

const SESSION_COLUMNS: &str =
    "id, token_hash, user_id, pending_user_id, expires_at, created_at, updated_at";

/// Persistence for browser sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, new_session: NewSession) -> Result<Session>;

    /// Session for the token digest, if it has not expired at `now`
    async fn find_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<Session>>;

    /// Record (or overwrite) the user awaiting a 2FA code
    async fn set_pending_user(&self, id: Uuid, user_id: Uuid) -> Result<Session>;

    /// Bind the session to a user, clear any pending marker and rotate the token
    async fn complete_login(
        &self,
        id: Uuid,
        user_id: Uuid,
        new_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Remove every session that expired at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// PostgreSQL implementation of [`SessionRepository`]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session> {
        let sql = format!(
            r#"
            INSERT INTO sessions (token_hash, user_id, pending_user_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        sqlx::query_as::<_, Session>(&sql)
            .bind(&new_session.token_hash)
            .bind(new_session.user_id)
            .bind(new_session.pending_user_id)
            .bind(new_session.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Session token collision"))
    }

    async fn find_active(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
        let sql = format!(
            "SELECT {} FROM sessions WHERE token_hash = $1 AND expires_at > $2",
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(session)
    }

    async fn set_pending_user(&self, id: Uuid, user_id: Uuid) -> Result<Session> {
        let sql = format!(
            r#"
            UPDATE sessions
            SET pending_user_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        sqlx::query_as::<_, Session>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Session conflict"))?
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))
    }

    async fn complete_login(
        &self,
        id: Uuid,
        user_id: Uuid,
        new_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session> {
        let sql = format!(
            r#"
            UPDATE sessions
            SET user_id = $2,
                pending_user_id = NULL,
                token_hash = $3,
                expires_at = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SESSION_COLUMNS
        );

        sqlx::query_as::<_, Session>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(new_token_hash)
            .bind(expires_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Session token collision"))?
            .ok_or_else(|| AppError::NotFound(format!("Session with id {} not found", id)))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
