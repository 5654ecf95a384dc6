//! Configuration management for the task API.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `TASK_STORE` - Optional. `sqlite` (default) or `memory`.
//! - `DATABASE_PATH` - Optional. SQLite database file. Defaults to `./data/tasks.db`.
//!   `:memory:` keeps the database in memory for the life of the process.
//! - `ADMIN_USERNAME` - Optional. Username created by `seed-admin`. Defaults to `admin`.
//! - `ADMIN_PASSWORD` - Required by `seed-admin` only.
//! - `PASSWORD_HASH_ITERATIONS` - Optional. PBKDF2 rounds. Defaults to `100000`.

use std::path::PathBuf;
use thiserror::Error;

use crate::task::store::TaskStoreType;

pub const DEFAULT_HASH_ITERATIONS: u32 = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Which task store backend to use
    pub store_type: TaskStoreType,

    /// SQLite database file (tasks and users)
    pub database_path: PathBuf,

    /// Username of the seeded administrator
    pub admin_username: String,

    /// Password of the seeded administrator, if provided
    pub admin_password: Option<String>,

    /// PBKDF2 iteration count for new password hashes
    pub hash_iterations: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT`, `TASK_STORE` or
    /// `PASSWORD_HASH_ITERATIONS` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let store_type = match std::env::var("TASK_STORE") {
            Ok(value) => TaskStoreType::parse(&value).ok_or_else(|| {
                ConfigError::InvalidValue(
                    "TASK_STORE".to_string(),
                    format!("unknown store '{}', expected 'sqlite' or 'memory'", value),
                )
            })?,
            Err(_) => TaskStoreType::default(),
        };

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/tasks.db"));

        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let hash_iterations = parse_iterations(std::env::var("PASSWORD_HASH_ITERATIONS").ok())?;

        Ok(Self {
            host,
            port,
            store_type,
            database_path,
            admin_username,
            admin_password,
            hash_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            store_type: TaskStoreType::Sqlite,
            database_path,
            admin_username: "admin".to_string(),
            admin_password: None,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
        }
    }

    /// The administrator password, required when seeding.
    pub fn admin_password(&self) -> Result<&str, ConfigError> {
        self.admin_password
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))
    }
}

fn parse_iterations(raw: Option<String>) -> Result<u32, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_HASH_ITERATIONS);
    };
    let invalid = |reason: String| {
        ConfigError::InvalidValue("PASSWORD_HASH_ITERATIONS".to_string(), reason)
    };
    let iterations: u32 = raw.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
    if iterations == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(iterations)
}
