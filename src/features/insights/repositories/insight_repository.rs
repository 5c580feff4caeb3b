use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::Result;
use crate::features::insights::models::{Insight, InsightChanges, NewInsight};

const COLUMNS: &str = "id, title, slug, excerpt, content, published, created_at, updated_at";

const DUPLICATE_SLUG: &str = "An insight with this slug already exists";

#[async_trait]
pub trait InsightRepository: Send + Sync {
    async fn create(&self, new_insight: NewInsight) -> Result<Insight>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Insight>>;

    /// Newest first; drafts only when `include_drafts`
    async fn list(&self, include_drafts: bool) -> Result<Vec<Insight>>;

    /// `None` if no insight has this id
    async fn update(&self, id: Uuid, changes: InsightChanges) -> Result<Option<Insight>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgInsightRepository {
    pool: PgPool,
}

impl PgInsightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightRepository for PgInsightRepository {
    async fn create(&self, new_insight: NewInsight) -> Result<Insight> {
        let sql = format!(
            r#"
            INSERT INTO insights (title, slug, excerpt, content, published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        );

        let insight = sqlx::query_as::<_, Insight>(&sql)
            .bind(&new_insight.title)
            .bind(&new_insight.slug)
            .bind(&new_insight.excerpt)
            .bind(&new_insight.content)
            .bind(new_insight.published)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SLUG))?;
        Ok(insight)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Insight>> {
        let sql = format!("SELECT {} FROM insights WHERE slug = $1", COLUMNS);
        let insight = sqlx::query_as::<_, Insight>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(insight)
    }

    async fn list(&self, include_drafts: bool) -> Result<Vec<Insight>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM insights
            WHERE published = TRUE OR $1
            ORDER BY created_at DESC
            "#,
            COLUMNS
        );
        let insights = sqlx::query_as::<_, Insight>(&sql)
            .bind(include_drafts)
            .fetch_all(&self.pool)
            .await?;
        Ok(insights)
    }

    async fn update(&self, id: Uuid, changes: InsightChanges) -> Result<Option<Insight>> {
        let sql = format!(
            r#"
            UPDATE insights
            SET title = COALESCE($1, title),
                slug = COALESCE($2, slug),
                excerpt = COALESCE($3, excerpt),
                content = COALESCE($4, content),
                published = COALESCE($5, published),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            COLUMNS
        );

        let insight = sqlx::query_as::<_, Insight>(&sql)
            .bind(changes.title)
            .bind(changes.slug)
            .bind(changes.excerpt)
            .bind(changes.content)
            .bind(changes.published)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SLUG))?;
        Ok(insight)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM insights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
