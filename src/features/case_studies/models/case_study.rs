use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::case_studies::dtos::CaseStudyResponseDto;

/// Database model for a client case study
#[derive(Debug, Clone, FromRow)]
pub struct CaseStudy {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub challenge: String,
    pub solution: String,
    pub results: String,
    pub client_type: String,
    pub duration: String,
    /// Ordered, stored as `TEXT[]`
    pub key_outcomes: Vec<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCaseStudy {
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
}

#[derive(Debug, Clone, Default)]
pub struct CaseStudyChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub results: Option<String>,
    pub client_type: Option<String>,
    pub duration: Option<String>,
    pub key_outcomes: Option<Vec<String>>,
    pub published: Option<bool>,
}

impl From<CaseStudy> for CaseStudyResponseDto {
    fn from(c: CaseStudy) -> Self {
        Self {
            id: c.id,
            title: c.title,
            slug: c.slug,
            summary: c.summary,
            challenge: c.challenge,
            solution: c.solution,
            results: c.results,
            client_type: c.client_type,
            duration: c.duration,
            key_outcomes: c.key_outcomes,
            published: c.published,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
