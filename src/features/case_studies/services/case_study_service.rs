use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::case_studies::dtos::{
    CaseStudyResponseDto, CreateCaseStudyDto, UpdateCaseStudyDto,
};
use crate::features::case_studies::repositories::CaseStudyRepository;

pub struct CaseStudyService {
    repo: Arc<dyn CaseStudyRepository>,
}

impl CaseStudyService {
    pub fn new(repo: Arc<dyn CaseStudyRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, include_drafts: bool) -> Result<Vec<CaseStudyResponseDto>> {
        let case_studies = self.repo.list(include_drafts).await?;
        Ok(case_studies.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_slug(
        &self,
        slug: &str,
        include_drafts: bool,
    ) -> Result<CaseStudyResponseDto> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(|c| c.published || include_drafts)
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Case study '{}' not found", slug)))
    }

    pub async fn create(&self, dto: CreateCaseStudyDto) -> Result<CaseStudyResponseDto> {
        let case_study = self.repo.create(dto.into()).await?;
        info!("Created case study {} ({})", case_study.id, case_study.slug);
        Ok(case_study.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCaseStudyDto) -> Result<CaseStudyResponseDto> {
        self.repo
            .update(id, dto.into())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Case study with id {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Case study with id {} not found",
                id
            )));
        }

        info!("Deleted case study {}", id);
        Ok(())
    }
}
