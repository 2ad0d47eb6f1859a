use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "campus.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "campus-logs";
const IN_MEMORY_DB: &str = ":memory:";

/// Where the student store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    Memory,
    File(PathBuf),
}

impl DbLocation {
    fn from_env(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::trim) {
            Some(IN_MEMORY_DB) => Self::Memory,
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::File(env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db: DbLocation,
    pub log_level: String,
    pub log_dir: String,
    pub seed_on_startup: bool,
}

impl AppConfig {
    /// Loads configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let db = DbLocation::from_env(env::var("CAMPUS_DB_PATH").ok());

        let log_level = env::var("CAMPUS_LOG_LEVEL")
            .unwrap_or_else(|_| campus_core::default_log_level().to_string());

        let log_dir = env::var("CAMPUS_LOG_DIR").unwrap_or_else(|_| {
            env::temp_dir()
                .join(DEFAULT_LOG_DIR_NAME)
                .display()
                .to_string()
        });

        let seed_on_startup = parse_flag(
            &env::var("CAMPUS_SEED").unwrap_or_else(|_| "true".to_string()),
        )
        .context("CAMPUS_SEED must be true or false")?;

        Ok(Self {
            host,
            port,
            db,
            log_level,
            log_dir,
            seed_on_startup,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("unrecognized flag value `{other}`"),
    }
}
