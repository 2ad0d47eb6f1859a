//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record and its embedded address.
//! - Define the create payload (`NewStudent`) and the partial payload
//!   (`StudentPatch`) used by merge-style updates.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `email` is unique across the store (enforced by the repository).
//! - In `StudentPatch`, an absent field means "not provided". Only
//!   `graduation_date` can be explicitly cleared with `null`.
//! - A patch `id` is opaque and never decoded; any JSON value is accepted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier for a persisted student.
pub type StudentId = Uuid;

/// Postal address owned by exactly one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postcode: i32,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>, postcode: i32) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postcode,
        }
    }
}

/// Canonical persisted student record.
///
/// Serialized with camelCase wire names (`fullTime`, `registerDate`, ...).
/// `graduationDate` is omitted from the wire shape while unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[cfg_attr(feature = "openapi", schema(value_type = Uuid))]
    pub id: StudentId,
    pub name: String,
    pub email: String,
    pub address: Address,
    pub age: i32,
    /// Insertion order is preserved.
    pub courses: Vec<String>,
    pub full_time: bool,
    pub gpa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<NaiveDateTime>,
    pub register_date: NaiveDateTime,
}

impl Student {
    /// Binds a store-assigned identity to a create payload.
    pub fn from_new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            address: new.address,
            age: new.age,
            courses: new.courses,
            full_time: new.full_time,
            gpa: new.gpa,
            graduation_date: new.graduation_date,
            register_date: new.register_date,
        }
    }
}

/// Create payload: a full student without identity.
///
/// An `id` sent by the caller is ignored; the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub address: Address,
    pub age: i32,
    pub courses: Vec<String>,
    pub full_time: bool,
    pub gpa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<NaiveDateTime>,
    pub register_date: NaiveDateTime,
}

/// Partial student payload for merge and full-replace updates.
///
/// Every field may be absent. `graduation_date` uses a nested option:
/// `None` is "not provided", `Some(None)` is an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    /// Carried through untouched; the path id always wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[allow(clippy::option_option)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<NaiveDateTime>))]
    pub graduation_date: Option<Option<NaiveDateTime>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register_date: Option<NaiveDateTime>,
}

/// A catalog field that should have been readable was not.
///
/// Raised only when internal bookkeeping disagrees with the field catalog,
/// never for bad caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to access field `{field}`")]
pub struct FieldAccessError {
    pub field: &'static str,
}

impl StudentPatch {
    /// Builds a complete student from this patch under `id`.
    ///
    /// Callers validate completeness first; an absent required field here is
    /// reported as a `FieldAccessError`. Any `id` carried by the patch is
    /// ignored in favor of `id`.
    pub fn into_student(self, id: StudentId) -> Result<Student, FieldAccessError> {
        Ok(Student {
            id,
            name: take(self.name, "name")?,
            email: take(self.email, "email")?,
            address: take(self.address, "address")?,
            age: take(self.age, "age")?,
            courses: take(self.courses, "courses")?,
            full_time: take(self.full_time, "fullTime")?,
            gpa: take(self.gpa, "gpa")?,
            graduation_date: self.graduation_date.flatten(),
            register_date: take(self.register_date, "registerDate")?,
        })
    }
}

impl From<Student> for StudentPatch {
    fn from(student: Student) -> Self {
        Self {
            id: Some(Value::String(student.id.to_string())),
            name: Some(student.name),
            email: Some(student.email),
            address: Some(student.address),
            age: Some(student.age),
            courses: Some(student.courses),
            full_time: Some(student.full_time),
            gpa: Some(student.gpa),
            graduation_date: Some(student.graduation_date),
            register_date: Some(student.register_date),
        }
    }
}

impl From<NewStudent> for StudentPatch {
    fn from(new: NewStudent) -> Self {
        Self {
            id: None,
            name: Some(new.name),
            email: Some(new.email),
            address: Some(new.address),
            age: Some(new.age),
            courses: Some(new.courses),
            full_time: Some(new.full_time),
            gpa: Some(new.gpa),
            graduation_date: Some(new.graduation_date),
            register_date: Some(new.register_date),
        }
    }
}

fn take<T>(value: Option<T>, field: &'static str) -> Result<T, FieldAccessError> {
    value.ok_or(FieldAccessError { field })
}

// serde maps a JSON `null` to the outer `None` for nested options; keep it as
// `Some(None)` so an explicit clear survives deserialization.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
