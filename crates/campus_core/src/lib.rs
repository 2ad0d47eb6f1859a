//! Core domain logic for the campus student record manager.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod merge;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, LoggingError};
pub use merge::merge;
pub use model::catalog::{FieldDescriptor, FieldRole, STUDENT_FIELDS};
pub use model::student::{Address, FieldAccessError, NewStudent, Student, StudentId, StudentPatch};
pub use repo::student_repo::{
    RepoError, RepoResult, SqliteStudentRepository, StudentGateway, StudentQuery,
};
pub use seed::{default_student, seed_default_student, SeedOutcome, DEFAULT_STUDENT_EMAIL};
pub use service::student_service::{ServiceResult, StudentService, StudentServiceError};
pub use validate::{validate_complete, MissingFieldError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
