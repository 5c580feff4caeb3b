mod insight_repository;

#[cfg(test)]
pub mod memory;

pub use insight_repository::{InsightRepository, PgInsightRepository};
