use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::Result;
use crate::features::case_studies::models::{CaseStudy, CaseStudyChanges, NewCaseStudy};

const COLUMNS: &str = "id, title, slug, summary, challenge, solution, results, client_type, \
                       duration, key_outcomes, published, created_at, updated_at";

const DUPLICATE_SLUG: &str = "A case study with this slug already exists";

#[async_trait]
pub trait CaseStudyRepository: Send + Sync {
    async fn create(&self, new_case_study: NewCaseStudy) -> Result<CaseStudy>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>>;

    /// Newest first; drafts only when `include_drafts`
    async fn list(&self, include_drafts: bool) -> Result<Vec<CaseStudy>>;

    async fn update(&self, id: Uuid, changes: CaseStudyChanges) -> Result<Option<CaseStudy>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgCaseStudyRepository {
    pool: PgPool,
}

impl PgCaseStudyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStudyRepository for PgCaseStudyRepository {
    async fn create(&self, new_case_study: NewCaseStudy) -> Result<CaseStudy> {
        let sql = format!(
            r#"
            INSERT INTO case_studies
                (title, slug, summary, challenge, solution, results, client_type, duration, key_outcomes, published)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COLUMNS
        );

        let case_study = sqlx::query_as::<_, CaseStudy>(&sql)
            .bind(&new_case_study.title)
            .bind(&new_case_study.slug)
            .bind(&new_case_study.summary)
            .bind(&new_case_study.challenge)
            .bind(&new_case_study.solution)
            .bind(&new_case_study.results)
            .bind(&new_case_study.client_type)
            .bind(&new_case_study.duration)
            .bind(&new_case_study.key_outcomes)
            .bind(new_case_study.published)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SLUG))?;
        Ok(case_study)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        let sql = format!("SELECT {} FROM case_studies WHERE slug = $1", COLUMNS);
        let case_study = sqlx::query_as::<_, CaseStudy>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(case_study)
    }

    async fn list(&self, include_drafts: bool) -> Result<Vec<CaseStudy>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM case_studies
            WHERE published = TRUE OR $1
            ORDER BY created_at DESC
            "#,
            COLUMNS
        );
        let case_studies = sqlx::query_as::<_, CaseStudy>(&sql)
            .bind(include_drafts)
            .fetch_all(&self.pool)
            .await?;
        Ok(case_studies)
    }

    async fn update(&self, id: Uuid, changes: CaseStudyChanges) -> Result<Option<CaseStudy>> {
        let sql = format!(
            r#"
            UPDATE case_studies
            SET title = COALESCE($1, title),
                slug = COALESCE($2, slug),
                summary = COALESCE($3, summary),
                challenge = COALESCE($4, challenge),
                solution = COALESCE($5, solution),
                results = COALESCE($6, results),
                client_type = COALESCE($7, client_type),
                duration = COALESCE($8, duration),
                key_outcomes = COALESCE($9, key_outcomes),
                published = COALESCE($10, published),
                updated_at = NOW()
            WHERE id = $11
            RETURNING {}
            "#,
            COLUMNS
        );

        let case_study = sqlx::query_as::<_, CaseStudy>(&sql)
            .bind(changes.title)
            .bind(changes.slug)
            .bind(changes.summary)
            .bind(changes.challenge)
            .bind(changes.solution)
            .bind(changes.results)
            .bind(changes.client_type)
            .bind(changes.duration)
            .bind(changes.key_outcomes)
            .bind(changes.published)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_SLUG))?;
        Ok(case_study)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM case_studies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
