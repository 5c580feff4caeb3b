use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::insights::dtos::InsightResponseDto;

/// Database model for an insight article
#[derive(Debug, Clone, FromRow)]
pub struct Insight {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInsight {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct InsightChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl From<Insight> for InsightResponseDto {
    fn from(i: Insight) -> Self {
        Self {
            id: i.id,
            title: i.title,
            slug: i.slug,
            excerpt: i.excerpt,
            content: i.content,
            published: i.published,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}
