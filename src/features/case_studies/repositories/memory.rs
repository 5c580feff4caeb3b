use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::CaseStudyRepository;
use crate::core::error::{AppError, Result};
use crate::features::case_studies::models::{CaseStudy, CaseStudyChanges, NewCaseStudy};

#[derive(Default)]
pub struct InMemoryCaseStudyRepository {
    case_studies: Mutex<Vec<CaseStudy>>,
}

fn duplicate_slug() -> AppError {
    AppError::Conflict("A case study with this slug already exists".to_string())
}

fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[async_trait]
impl CaseStudyRepository for InMemoryCaseStudyRepository {
    async fn create(&self, new: NewCaseStudy) -> Result<CaseStudy> {
        let mut case_studies = self.case_studies.lock().unwrap();
        if case_studies.iter().any(|c| c.slug == new.slug) {
            return Err(duplicate_slug());
        }

        let now = Utc::now();
        let case_study = CaseStudy {
            id: Uuid::new_v4(),
            title: new.title,
            slug: new.slug,
            summary: new.summary,
            challenge: new.challenge,
            solution: new.solution,
            results: new.results,
            client_type: new.client_type,
            duration: new.duration,
            key_outcomes: new.key_outcomes,
            published: new.published,
            created_at: now,
            updated_at: now,
        };
        case_studies.push(case_study.clone());
        Ok(case_study)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        Ok(self
            .case_studies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn list(&self, include_drafts: bool) -> Result<Vec<CaseStudy>> {
        Ok(self
            .case_studies
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| include_drafts || c.published)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: CaseStudyChanges) -> Result<Option<CaseStudy>> {
        let mut case_studies = self.case_studies.lock().unwrap();
        if let Some(slug) = &changes.slug {
            if case_studies.iter().any(|c| c.id != id && &c.slug == slug) {
                return Err(duplicate_slug());
            }
        }

        let Some(case_study) = case_studies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        merge(&mut case_study.title, changes.title);
        merge(&mut case_study.slug, changes.slug);
        merge(&mut case_study.summary, changes.summary);
        merge(&mut case_study.challenge, changes.challenge);
        merge(&mut case_study.solution, changes.solution);
        merge(&mut case_study.results, changes.results);
        merge(&mut case_study.client_type, changes.client_type);
        merge(&mut case_study.duration, changes.duration);
        merge(&mut case_study.key_outcomes, changes.key_outcomes);
        merge(&mut case_study.published, changes.published);
        case_study.updated_at = Utc::now();
        Ok(Some(case_study.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut case_studies = self.case_studies.lock().unwrap();
        let before = case_studies.len();
        case_studies.retain(|c| c.id != id);
        Ok(case_studies.len() < before)
    }
}
