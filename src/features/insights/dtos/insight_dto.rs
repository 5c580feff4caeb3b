use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::insights::models::{InsightChanges, NewInsight};
use crate::shared::validation::SLUG_REGEX;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInsightDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    /// Lowercase words separated by single hyphens, e.g. `scaling-ops-2024`
    #[validate(
        length(min = 1, max = 255),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by hyphens")
    )]
    pub slug: String,

    #[validate(length(min = 1, message = "Excerpt is required"))]
    pub excerpt: String,

    /// Rich text body
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub published: bool,
}

impl From<CreateInsightDto> for NewInsight {
    fn from(dto: CreateInsightDto) -> Self {
        Self {
            title: dto.title,
            slug: dto.slug,
            excerpt: dto.excerpt,
            content: dto.content,
            published: dto.published,
        }
    }
}

/// Absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInsightDto {
    #[validate(length(min = 1, max = 255, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 255),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by hyphens")
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Excerpt must not be empty"))]
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub published: Option<bool>,
}

impl From<UpdateInsightDto> for InsightChanges {
    fn from(dto: UpdateInsightDto) -> Self {
        Self {
            title: dto.title,
            slug: dto.slug,
            excerpt: dto.excerpt,
            content: dto.content,
            published: dto.published,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{"insight": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightEnvelopeDto {
    pub insight: InsightResponseDto,
}

/// `{"insights": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsightListDto {
    pub insights: Vec<InsightResponseDto>,
}
