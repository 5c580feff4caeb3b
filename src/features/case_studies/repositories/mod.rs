mod case_study_repository;

#[cfg(test)]
pub mod memory;

pub use case_study_repository::{CaseStudyRepository, PgCaseStudyRepository};
