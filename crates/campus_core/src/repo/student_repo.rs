//! Student gateway contract and SQLite document-store implementation.
//!
//! # Responsibility
//! - Provide get/put/delete/exists/query over the `students` collection.
//! - Store each student as a JSON document with indexed projections.
//!
//! # Invariants
//! - `email` is unique across stored documents.
//! - Read paths reject undecodable documents instead of masking them.
//! - Query results come back in insertion order.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::student::{NewStudent, Student, StudentId};
use rusqlite::{params, Connection, ErrorCode, Row};
use thiserror::Error;
use uuid::Uuid;

const STUDENT_SELECT_SQL: &str = "SELECT id, document FROM students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("student not found: {0}")]
    NotFound(StudentId),
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("invalid persisted student data: {0}")]
    InvalidData(String),
    #[error("failed to encode student document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("student store schema version {found} does not match expected {expected}")]
    SchemaNotReady { found: u32, expected: u32 },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read predicates supported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentQuery {
    All,
    /// Case-sensitive name prefix. An empty prefix matches everyone.
    NameStartsWith(String),
    /// Inclusive on both bounds. `min > max` matches nothing.
    AgeBetween { min: i32, max: i32 },
    EmailEquals(String),
}

/// Storage interface consumed by `StudentService`.
pub trait StudentGateway {
    /// Persists a new student under a store-assigned id.
    fn insert(&self, student: &NewStudent) -> RepoResult<StudentId>;
    fn get(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Inserts or replaces the student stored under `student.id`.
    fn put(&self, student: &Student) -> RepoResult<StudentId>;
    /// Removes a student; `NotFound` when nothing was removed.
    fn delete(&self, id: StudentId) -> RepoResult<()>;
    fn exists(&self, id: StudentId) -> RepoResult<bool>;
    fn query(&self, query: &StudentQuery) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed student document store.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `SchemaNotReady` when the connection has not been opened
    /// through `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = current_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }

    fn collect(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }
}

impl StudentGateway for SqliteStudentRepository<'_> {
    fn insert(&self, student: &NewStudent) -> RepoResult<StudentId> {
        let stored = Student::from_new(Uuid::new_v4(), student.clone());
        let document = serde_json::to_string(&stored)?;

        self.conn
            .execute(
                "INSERT INTO students (id, name, email, age, document)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    stored.id.to_string(),
                    stored.name.as_str(),
                    stored.email.as_str(),
                    stored.age,
                    document,
                ],
            )
            .map_err(|err| map_write_error(err, &stored.email))?;

        Ok(stored.id)
    }

    fn get(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn put(&self, student: &Student) -> RepoResult<StudentId> {
        let document = serde_json::to_string(student)?;

        self.conn
            .execute(
                "INSERT INTO students (id, name, email, age, document)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (id) DO UPDATE SET
                    name = excluded.name,
                    email = excluded.email,
                    age = excluded.age,
                    document = excluded.document,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![
                    student.id.to_string(),
                    student.name.as_str(),
                    student.email.as_str(),
                    student.age,
                    document,
                ],
            )
            .map_err(|err| map_write_error(err, &student.email))?;

        Ok(student.id)
    }

    fn delete(&self, id: StudentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn exists(&self, id: StudentId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn query(&self, query: &StudentQuery) -> RepoResult<Vec<Student>> {
        match query {
            StudentQuery::All => self.collect(
                &format!("{STUDENT_SELECT_SQL} ORDER BY rowid ASC;"),
                params![],
            ),
            StudentQuery::NameStartsWith(prefix) => self.collect(
                &format!(
                    "{STUDENT_SELECT_SQL}
                     WHERE substr(name, 1, length(?1)) = ?1
                     ORDER BY rowid ASC;"
                ),
                [prefix.as_str()],
            ),
            StudentQuery::AgeBetween { min, max } => self.collect(
                &format!(
                    "{STUDENT_SELECT_SQL}
                     WHERE age BETWEEN ?1 AND ?2
                     ORDER BY rowid ASC;"
                ),
                params![min, max],
            ),
            StudentQuery::EmailEquals(email) => self.collect(
                &format!("{STUDENT_SELECT_SQL} WHERE email = ?1 ORDER BY rowid ASC;"),
                [email.as_str()],
            ),
        }
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in students.id"))
    })?;

    let document: String = row.get("document")?;
    let student: Student = serde_json::from_str(&document).map_err(|err| {
        RepoError::InvalidData(format!("undecodable document for student {id}: {err}"))
    })?;

    if student.id != id {
        return Err(RepoError::InvalidData(format!(
            "document id {} does not match row id {id}",
            student.id
        )));
    }

    Ok(student)
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.code == ErrorCode::ConstraintViolation && message.contains("students.email") {
            return RepoError::DuplicateEmail(email.to_string());
        }
    }
    err.into()
}
