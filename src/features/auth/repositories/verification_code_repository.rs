use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::Result;
use crate::features::auth::models::{NewVerificationCode, VerificationCode, VerificationCodeType};

const CODE_COLUMNS: &str = "id, user_id, code, code_type, expires_at, used, created_at";

/// Persistence for emailed one-time codes
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    async fn create(&self, new_code: NewVerificationCode) -> Result<VerificationCode>;

    /// Most recent unused code of the given type matching `code` for the user.
    /// Expiry is checked by the caller.
    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
        code_type: VerificationCodeType,
    ) -> Result<Option<VerificationCode>>;

    /// Conditionally mark a code used. Returns `false` when another request
    /// consumed it first.
    async fn mark_used(&self, id: Uuid) -> Result<bool>;

    /// Remove every code whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

/// PostgreSQL implementation of [`VerificationCodeRepository`]
pub struct PgVerificationCodeRepository {
    pool: PgPool,
}

impl PgVerificationCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationCodeRepository for PgVerificationCodeRepository {
    async fn create(&self, new_code: NewVerificationCode) -> Result<VerificationCode> {
        let sql = format!(
            r#"
            INSERT INTO verification_codes (user_id, code, code_type, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            CODE_COLUMNS
        );

        sqlx::query_as::<_, VerificationCode>(&sql)
            .bind(new_code.user_id)
            .bind(&new_code.code)
            .bind(new_code.code_type)
            .bind(new_code.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Verification code already exists"))
    }

    async fn find_unused(
        &self,
        user_id: Uuid,
        code: &str,
        code_type: VerificationCodeType,
    ) -> Result<Option<VerificationCode>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM verification_codes
            WHERE user_id = $1 AND code = $2 AND code_type = $3 AND used = FALSE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            CODE_COLUMNS
        );

        let found = sqlx::query_as::<_, VerificationCode>(&sql)
            .bind(user_id)
            .bind(code)
            .bind(code_type)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found)
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("UPDATE verification_codes SET used = TRUE WHERE id = $1 AND used = FALSE")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
