use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::InsightRepository;
use crate::core::error::{AppError, Result};
use crate::features::insights::models::{Insight, InsightChanges, NewInsight};

#[derive(Default)]
pub struct InMemoryInsightRepository {
    insights: Mutex<Vec<Insight>>,
}

fn duplicate_slug() -> AppError {
    AppError::Conflict("An insight with this slug already exists".to_string())
}

#[async_trait]
impl InsightRepository for InMemoryInsightRepository {
    async fn create(&self, new_insight: NewInsight) -> Result<Insight> {
        let mut insights = self.insights.lock().unwrap();
        if insights.iter().any(|i| i.slug == new_insight.slug) {
            return Err(duplicate_slug());
        }

        let now = Utc::now();
        let insight = Insight {
            id: Uuid::new_v4(),
            title: new_insight.title,
            slug: new_insight.slug,
            excerpt: new_insight.excerpt,
            content: new_insight.content,
            published: new_insight.published,
            created_at: now,
            updated_at: now,
        };
        insights.push(insight.clone());
        Ok(insight)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Insight>> {
        Ok(self
            .insights
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.slug == slug)
            .cloned())
    }

    async fn list(&self, include_drafts: bool) -> Result<Vec<Insight>> {
        let insights = self.insights.lock().unwrap();
        // Insertion order is creation order
        Ok(insights
            .iter()
            .rev()
            .filter(|i| include_drafts || i.published)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: InsightChanges) -> Result<Option<Insight>> {
        let mut insights = self.insights.lock().unwrap();
        if let Some(slug) = &changes.slug {
            if insights.iter().any(|i| i.id != id && &i.slug == slug) {
                return Err(duplicate_slug());
            }
        }

        let Some(insight) = insights.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            insight.title = title;
        }
        if let Some(slug) = changes.slug {
            insight.slug = slug;
        }
        if let Some(excerpt) = changes.excerpt {
            insight.excerpt = excerpt;
        }
        if let Some(content) = changes.content {
            insight.content = content;
        }
        if let Some(published) = changes.published {
            insight.published = published;
        }
        insight.updated_at = Utc::now();
        Ok(Some(insight.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut insights = self.insights.lock().unwrap();
        let before = insights.len();
        insights.retain(|i| i.id != id);
        Ok(insights.len() < before)
    }
}
