use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::insights::dtos::{CreateInsightDto, InsightResponseDto, UpdateInsightDto};
use crate::features::insights::repositories::InsightRepository;

/// Service for insight articles
pub struct InsightService {
    repo: Arc<dyn InsightRepository>,
}

impl InsightService {
    pub fn new(repo: Arc<dyn InsightRepository>) -> Self {
        Self { repo }
    }

    /// List insights, newest first
    pub async fn list(&self, include_drafts: bool) -> Result<Vec<InsightResponseDto>> {
        let insights = self.repo.list(include_drafts).await?;
        Ok(insights.into_iter().map(Into::into).collect())
    }

    /// Get an insight by slug. Drafts are only visible with `include_drafts`.
    pub async fn get_by_slug(&self, slug: &str, include_drafts: bool) -> Result<InsightResponseDto> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(|i| i.published || include_drafts)
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Insight '{}' not found", slug)))
    }

    pub async fn create(&self, dto: CreateInsightDto) -> Result<InsightResponseDto> {
        let insight = self.repo.create(dto.into()).await?;
        info!("Created insight {} ({})", insight.id, insight.slug);
        Ok(insight.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateInsightDto) -> Result<InsightResponseDto> {
        self.repo
            .update(id, dto.into())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Insight with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Insight with id {} not found",
                id
            )));
        }

        info!("Deleted insight {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::insights::repositories::memory::InMemoryInsightRepository;
    use fake::faker::lorem::en::{Paragraph, Sentence};
    use fake::Fake;

    fn service() -> InsightService {
        InsightService::new(Arc::new(InMemoryInsightRepository::default()))
    }

    fn dto(slug: &str, published: bool) -> CreateInsightDto {
        CreateInsightDto {
            title: Sentence(3..6).fake(),
            slug: slug.to_string(),
            excerpt: Sentence(5..10).fake(),
            content: Paragraph(2..4).fake(),
            published,
        }
    }

    #[tokio::test]
    async fn test_drafts_are_hidden_from_public_listing() {
        let service = service();
        service.create(dto("draft", false)).await.unwrap();
        service.create(dto("live", true)).await.unwrap();

        let public = service.list(false).await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].slug, "live");

        let all = service.list(true).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].slug, "live");
    }

    #[tokio::test]
    async fn test_draft_by_slug_is_not_found_for_public() {
        let service = service();
        service.create(dto("draft", false)).await.unwrap();

        let result = service.get_by_slug("draft", false).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.get_by_slug("draft", true).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts_and_keeps_original() {
        let service = service();
        let original = service.create(dto("pricing", true)).await.unwrap();

        let result = service.create(dto("pricing", false)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let stored = service.get_by_slug("pricing", false).await.unwrap();
        assert_eq!(stored.id, original.id);
        assert_eq!(stored.title, original.title);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let service = service();
        let created = service.create(dto("pricing", false)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateInsightDto {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.published);
        assert_eq!(updated.slug, "pricing");
        assert_eq!(updated.title, created.title);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_slug_conflicts() {
        let service = service();
        service.create(dto("taken", true)).await.unwrap();
        let other = service.create(dto("other", true)).await.unwrap();

        let result = service
            .update(
                other.id,
                UpdateInsightDto {
                    slug: Some("taken".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let service = service();
        let id = Uuid::new_v4();

        let update = service.update(id, UpdateInsightDto::default()).await;
        assert!(matches!(update, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.delete(id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_insight() {
        let service = service();
        let created = service.create(dto("gone", true)).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(service.list(true).await.unwrap().is_empty());
    }
}
