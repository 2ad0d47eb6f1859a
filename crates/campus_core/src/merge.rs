//! Field merge engine for partial updates.
//!
//! # Responsibility
//! - Combine a persisted student with an incoming patch, field by field.
//!
//! # Invariants
//! - Present patch fields replace existing values verbatim; absent fields keep
//!   the existing value.
//! - `id` is never taken from the patch.
//! - The caller's `existing` value is never mutated.

use crate::model::catalog::{FieldRole, STUDENT_FIELDS};
use crate::model::student::{Student, StudentPatch};

/// Returns `existing` with every present field of `incoming` applied.
///
/// Pure and infallible: an empty patch yields a copy of `existing`.
pub fn merge(existing: &Student, incoming: &StudentPatch) -> Student {
    let mut merged = existing.clone();
    for descriptor in STUDENT_FIELDS
        .iter()
        .filter(|descriptor| descriptor.role != FieldRole::Identity)
    {
        descriptor.apply(&mut merged, incoming);
    }
    merged
}
