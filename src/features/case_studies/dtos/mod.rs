mod case_study_dto;

pub use case_study_dto::*;
