//! Student update orchestrator.
//!
//! # Responsibility
//! - Coordinate lookup, merge/validate and persistence for create, full
//!   update, partial update and delete.
//! - Expose read delegations (by id, all, name prefix, age range).
//!
//! # Invariants
//! - Full update validates completeness before touching the store.
//! - Partial update never runs the completeness check.
//! - No locking around lookup-then-persist: concurrent writers to one id
//!   can overwrite each other (last write wins).

use crate::merge::merge;
use crate::model::catalog::present_fields;
use crate::model::student::{FieldAccessError, NewStudent, Student, StudentId, StudentPatch};
use crate::repo::student_repo::{RepoError, StudentGateway, StudentQuery};
use crate::seed::{seed_default_student, SeedOutcome};
use crate::validate::{validate_complete, MissingFieldError};
use log::{info, warn};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, StudentServiceError>;

/// Service error for student use-cases.
#[derive(Debug, Error)]
pub enum StudentServiceError {
    /// Full-replace payload is incomplete.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
    /// Target student does not exist.
    #[error("student not found: {0}")]
    NotFound(StudentId),
    /// Internal disagreement with the field catalog.
    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),
    /// Persistence-layer failure.
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for StudentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Student service facade over a gateway implementation.
pub struct StudentService<G: StudentGateway> {
    gateway: G,
}

impl<G: StudentGateway> StudentService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Persists `student` as-is and returns its assigned id.
    pub fn create(&self, student: &NewStudent) -> ServiceResult<StudentId> {
        let id = self.gateway.insert(student)?;
        info!("event=student_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Replaces the student stored under `id` with `record`.
    ///
    /// # Contract
    /// - Fails with `MissingField` before any lookup or write when a required
    ///   field is absent.
    /// - Upserts: an unknown `id` is persisted as a new student.
    /// - The stored id is always `id`, whatever `record.id` says.
    /// - An absent `graduationDate` is stored as unset.
    pub fn full_update(&self, id: StudentId, record: StudentPatch) -> ServiceResult<Student> {
        if let Err(err) = validate_complete(&record) {
            warn!(
                "event=student_full_update module=service status=rejected id={id} missing_field={}",
                err.field
            );
            return Err(err.into());
        }

        let existed = self.gateway.exists(id)?;
        let student = record.into_student(id)?;
        self.gateway.put(&student)?;
        info!("event=student_full_update module=service status=ok id={id} existed={existed}");
        Ok(student)
    }

    /// Merges `patch` into the stored student and persists the result.
    ///
    /// # Contract
    /// - `NotFound` when `id` is unknown.
    /// - Only fields present in `patch` change.
    pub fn partial_update(&self, id: StudentId, patch: &StudentPatch) -> ServiceResult<Student> {
        let existing = self
            .gateway
            .get(id)?
            .ok_or(StudentServiceError::NotFound(id))?;

        let merged = merge(&existing, patch);
        self.gateway.put(&merged)?;
        info!(
            "event=student_partial_update module=service status=ok id={id} fields={}",
            present_fields(patch).join(",")
        );
        Ok(merged)
    }

    /// Deletes the student stored under `id`.
    pub fn delete(&self, id: StudentId) -> ServiceResult<()> {
        if !self.gateway.exists(id)? {
            return Err(StudentServiceError::NotFound(id));
        }

        self.gateway.delete(id)?;
        info!("event=student_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one student; `NotFound` when `id` is unknown.
    pub fn find_by_id(&self, id: StudentId) -> ServiceResult<Student> {
        self.gateway
            .get(id)?
            .ok_or(StudentServiceError::NotFound(id))
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.gateway.query(&StudentQuery::All)?)
    }

    /// Lists students whose name starts with `prefix` (case-sensitive).
    pub fn find_starting_with(&self, prefix: &str) -> ServiceResult<Vec<Student>> {
        Ok(self
            .gateway
            .query(&StudentQuery::NameStartsWith(prefix.to_string()))?)
    }

    /// Lists students aged within `min..=max`.
    pub fn find_by_age_range(&self, min: i32, max: i32) -> ServiceResult<Vec<Student>> {
        Ok(self.gateway.query(&StudentQuery::AgeBetween { min, max })?)
    }

    /// Inserts the default student unless its email is already taken.
    pub fn seed_default(&self) -> ServiceResult<SeedOutcome> {
        Ok(seed_default_student(&self.gateway)?)
    }
}
