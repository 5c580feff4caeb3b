pub mod case_study_handler;

pub use case_study_handler::*;
