//! Administrative users.
//!
//! Users are only created by the `seed-admin` command; the HTTP API does not
//! expose them.

pub mod password;
pub mod seed;

use chrono::Utc;
use rusqlite::{params, ErrorCode, OptionalExtension};

use crate::db::{Database, StoreError};

pub use password::{hash_password, verify_password, PasswordHashError};
pub use seed::{seed_admin, SeedError, SeedOutcome};

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Encoded PBKDF2 hash, see [`password`].
    pub password_hash: String,
    /// RFC 3339 creation time.
    pub created_at: String,
}

/// SQLite-backed user table.
#[derive(Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let username = username.to_string();
        self.db
            .call(move |conn| {
                let user = conn
                    .query_row(
                        "SELECT id, username, password_hash, created_at
                         FROM users WHERE username = ?1",
                        params![&username],
                        |row| {
                            Ok(User {
                                id: row.get(0)?,
                                username: row.get(1)?,
                                password_hash: row.get(2)?,
                                created_at: row.get(3)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(user)
            })
            .await
    }

    /// Insert a user. Fails with [`StoreError::Duplicate`] if the username is taken.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = User {
            id: 0,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.db
            .call(move |conn| {
                let inserted = conn.execute(
                    "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
                    params![&user.username, &user.password_hash, &user.created_at],
                );
                match inserted {
                    Ok(_) => Ok(User {
                        id: conn.last_insert_rowid(),
                        ..user
                    }),
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == ErrorCode::ConstraintViolation =>
                    {
                        Err(StoreError::Duplicate(format!("User '{}'", user.username)))
                    }
                    Err(e) => Err(e.into()),
                }
            })
            .await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.db
            .call(|conn| {
                let total: i64 =
                    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
                Ok(total.max(0) as u64)
            })
            .await
    }
}
