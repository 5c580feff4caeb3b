pub mod auth;
pub mod case_studies;
pub mod contacts;
pub mod insights;
