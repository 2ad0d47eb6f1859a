//! Record store gateway contract and persistence implementation.
//!
//! # Responsibility
//! - Define the narrow storage interface the orchestrator depends on.
//! - Isolate SQLite and JSON document details from use-case code.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`)
//!   in addition to DB transport errors.

pub mod student_repo;
