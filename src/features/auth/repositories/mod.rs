mod session_repository;
mod user_repository;
mod verification_code_repository;

#[cfg(test)]
pub mod memory;

pub use session_repository::{PgSessionRepository, SessionRepository};
pub use user_repository::{PgUserRepository, UserRepository};
pub use verification_code_repository::{PgVerificationCodeRepository, VerificationCodeRepository};
