//! Startup seeding of the default student.
//!
//! # Invariants
//! - Seeding is keyed by email; running it twice inserts at most once.

use crate::model::student::{Address, NewStudent, StudentId};
use crate::repo::student_repo::{RepoResult, StudentGateway, StudentQuery};
use chrono::NaiveDateTime;
use log::info;

/// Email identifying the default student.
pub const DEFAULT_STUDENT_EMAIL: &str = "flying.dutchman@bikinibottom.com";

const DEFAULT_REGISTER_DATE: &str = "2024-07-19T08:45:05.546";

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(StudentId),
    AlreadyPresent,
}

/// Returns the default student record.
pub fn default_student() -> NewStudent {
    let register_date = DEFAULT_REGISTER_DATE
        .parse::<NaiveDateTime>()
        .expect("valid default register date");

    NewStudent {
        name: "Flying Dutchman".to_string(),
        email: DEFAULT_STUDENT_EMAIL.to_string(),
        address: Address::new("123 Main St", "Anytown", 12335),
        age: 12,
        courses: vec![
            "History".to_string(),
            "Geography".to_string(),
            "Navigation".to_string(),
        ],
        full_time: true,
        gpa: 3.2,
        graduation_date: None,
        register_date,
    }
}

/// Inserts `default_student()` unless a student with its email exists.
pub fn seed_default_student<G: StudentGateway>(gateway: &G) -> RepoResult<SeedOutcome> {
    info!("event=seed module=seed status=start");

    let existing = gateway.query(&StudentQuery::EmailEquals(DEFAULT_STUDENT_EMAIL.to_string()))?;
    if !existing.is_empty() {
        info!("event=seed module=seed status=skipped reason=already_present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let id = gateway.insert(&default_student())?;
    info!("event=seed module=seed status=ok id={id}");
    Ok(SeedOutcome::Seeded(id))
}
