use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::case_studies::models::{CaseStudyChanges, NewCaseStudy};
use crate::shared::validation::SLUG_REGEX;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseStudyDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(
        length(min = 1, max = 255),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by hyphens")
    )]
    pub slug: String,

    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,

    #[validate(length(min = 1, message = "Challenge is required"))]
    pub challenge: String,

    #[validate(length(min = 1, message = "Solution is required"))]
    pub solution: String,

    /// Rich text
    #[validate(length(min = 1, message = "Results are required"))]
    pub results: String,

    #[validate(length(min = 1, max = 255, message = "Client type is required"))]
    pub client_type: String,

    #[validate(length(min = 1, max = 255, message = "Duration is required"))]
    pub duration: String,

    #[validate(length(min = 1, message = "At least one key outcome is required"))]
    pub key_outcomes: Vec<String>,

    #[serde(default)]
    pub published: bool,
}

impl From<CreateCaseStudyDto> for NewCaseStudy {
    fn from(dto: CreateCaseStudyDto) -> Self {
        Self {
            title: dto.title,
            slug: dto.slug,
            summary: dto.summary,
            challenge: dto.challenge,
            solution: dto.solution,
            results: dto.results,
            client_type: dto.client_type,
            duration: dto.duration,
            key_outcomes: dto.key_outcomes,
            published: dto.published,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseStudyDto {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 255),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by hyphens")
    )]
    pub slug: Option<String>,

    #[validate(length(min = 1))]
    pub summary: Option<String>,

    #[validate(length(min = 1))]
    pub challenge: Option<String>,

    #[validate(length(min = 1))]
    pub solution: Option<String>,

    #[validate(length(min = 1))]
    pub results: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub client_type: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub duration: Option<String>,

    #[validate(length(min = 1))]
    pub key_outcomes: Option<Vec<String>>,

    pub published: Option<bool>,
}

impl From<UpdateCaseStudyDto> for CaseStudyChanges {
    fn from(dto: UpdateCaseStudyDto) -> Self {
        Self {
            title: dto.title,
            slug: dto.slug,
            summary: dto.summary,
            challenge: dto.challenge,
            solution: dto.solution,
            results: dto.results,
            client_type: dto.client_type,
            duration: dto.duration,
            key_outcomes: dto.key_outcomes,
            published: dto.published,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyResponseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    pub client_type: String,
    pub duration: String,
    pub key_outcomes: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{"caseStudy": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyEnvelopeDto {
    pub case_study: CaseStudyResponseDto,
}

/// `{"caseStudies": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyListDto {
    pub case_studies: Vec<CaseStudyResponseDto>,
}
