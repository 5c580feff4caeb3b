mod contact_repository;

#[cfg(test)]
pub mod memory;

pub use contact_repository::{ContactRepository, PgContactRepository};
