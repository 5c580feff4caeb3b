mod case_study_service;

pub use case_study_service::CaseStudyService;
