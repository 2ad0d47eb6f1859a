//! Student domain model and its field catalog.
//!
//! # Responsibility
//! - Define the canonical student record and its create/patch shapes.
//! - Declare the ordered field catalog consumed by merge and validation.
//!
//! # Invariants
//! - Every persisted student is identified by a stable `StudentId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod catalog;
pub mod student;
