//! Statically declared field catalog for `Student`.
//!
//! # Responsibility
//! - List every student field once, in declaration order, with its wire
//!   name, role and typed accessors.
//! - Let merge and completeness checks iterate fields generically without
//!   runtime reflection.
//!
//! # Invariants
//! - Catalog order is the order used when reporting missing fields.
//! - `id` is the only `Identity` field and is never written from a patch.
//! - Required-ness lives on each descriptor; there is no separate exclusion
//!   list.

use crate::model::student::{Student, StudentPatch};

/// How a field participates in merge and completeness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Store-assigned identity. Never merged, never required from callers.
    Identity,
    /// Must be present for a patch to count as a complete student.
    Required,
    /// May be absent even in a complete student.
    Optional,
}

/// One entry of the student field catalog.
pub struct FieldDescriptor {
    /// Wire (JSON) name, also used in error messages.
    pub name: &'static str,
    pub role: FieldRole,
    is_present: fn(&StudentPatch) -> bool,
    apply: fn(&mut Student, &StudentPatch),
}

impl FieldDescriptor {
    pub fn is_required(&self) -> bool {
        self.role == FieldRole::Required
    }

    /// Returns whether `patch` carries a value for this field.
    pub fn is_present(&self, patch: &StudentPatch) -> bool {
        (self.is_present)(patch)
    }

    /// Copies this field from `patch` into `target` when present.
    ///
    /// Absent fields leave `target` untouched. The copy is verbatim.
    pub fn apply(&self, target: &mut Student, patch: &StudentPatch) {
        (self.apply)(target, patch)
    }
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}

macro_rules! patch_field {
    ($wire:literal, $field:ident, $role:expr) => {
        FieldDescriptor {
            name: $wire,
            role: $role,
            is_present: |patch: &StudentPatch| patch.$field.is_some(),
            apply: |target: &mut Student, patch: &StudentPatch| {
                if let Some(value) = &patch.$field {
                    target.$field = value.clone();
                }
            },
        }
    };
}

/// Student fields in declaration order.
pub static STUDENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "id",
        role: FieldRole::Identity,
        is_present: |patch: &StudentPatch| patch.id.is_some(),
        apply: |_target: &mut Student, _patch: &StudentPatch| {},
    },
    patch_field!("name", name, FieldRole::Required),
    patch_field!("email", email, FieldRole::Required),
    patch_field!("address", address, FieldRole::Required),
    patch_field!("age", age, FieldRole::Required),
    patch_field!("courses", courses, FieldRole::Required),
    patch_field!("fullTime", full_time, FieldRole::Required),
    patch_field!("gpa", gpa, FieldRole::Required),
    patch_field!("graduationDate", graduation_date, FieldRole::Optional),
    patch_field!("registerDate", register_date, FieldRole::Required),
];

/// Iterates required fields in catalog order.
pub fn required_fields() -> impl Iterator<Item = &'static FieldDescriptor> {
    STUDENT_FIELDS.iter().filter(|descriptor| descriptor.is_required())
}

/// Returns wire names of the fields present in `patch`, in catalog order.
pub fn present_fields(patch: &StudentPatch) -> Vec<&'static str> {
    STUDENT_FIELDS
        .iter()
        .filter(|descriptor| descriptor.is_present(patch))
        .map(|descriptor| descriptor.name)
        .collect()
}
