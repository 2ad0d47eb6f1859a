//! Completeness validation for full-replace updates.
//!
//! # Responsibility
//! - Reject a full-replace payload that omits any required field.
//!
//! # Invariants
//! - Only the first missing field, in catalog order, is reported.
//! - Used by the full-update path only; create and merge never call it.

use crate::model::catalog::required_fields;
use crate::model::student::StudentPatch;
use thiserror::Error;

/// A full-replace payload omitted a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing required field: {field}")]
pub struct MissingFieldError {
    /// Wire name of the first missing field.
    pub field: &'static str,
}

/// Checks that every required field is present in `record`.
pub fn validate_complete(record: &StudentPatch) -> Result<(), MissingFieldError> {
    match required_fields().find(|descriptor| !descriptor.is_present(record)) {
        Some(descriptor) => Err(MissingFieldError {
            field: descriptor.name,
        }),
        None => Ok(()),
    }
}
