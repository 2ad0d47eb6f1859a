use std::path::Path;
use std::sync::{Arc, Mutex};

use campus_core::db::{open_db, open_db_in_memory, DbResult};
use campus_core::{ServiceResult, SqliteStudentRepository, StudentService};
use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Shared handler state: one migrated SQLite connection.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens (and migrates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a fresh in-memory store.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Runs `f` against a student service on the blocking pool.
    ///
    /// The connection lock is held for the whole call.
    pub async fn with_student_service<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&StudentService<SqliteStudentRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| AppError::internal("student store lock poisoned"))?;
            let repo = SqliteStudentRepository::try_new(&conn)?;
            let service = StudentService::new(repo);
            f(&service).map_err(AppError::from)
        })
        .await
        .map_err(|err| AppError::internal(format!("student store task failed: {err}")))?
    }
}
