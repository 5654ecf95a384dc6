//! Idempotent creation of the administrative user.

use thiserror::Error;

use super::{hash_password, User, UserStore};
use crate::db::StoreError;
use crate::validation::{self, TextInput, Violations, MAX_TEXT_LEN};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid seed input:\n{0}")]
    Invalid(Violations),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a seeding run.
#[derive(Debug)]
pub enum SeedOutcome {
    Created(User),
    /// A user with that name was already present; nothing was written.
    AlreadyExists(User),
}

/// Create `username` with a hashed `password` unless it already exists.
pub async fn seed_admin(
    store: &UserStore,
    username: &str,
    password: &str,
    iterations: u32,
) -> Result<SeedOutcome, SeedError> {
    let mut violations = Violations::new();
    validation::required_text(&mut violations, "username", TextInput::Text(username), MAX_TEXT_LEN);
    validation::required_text(&mut violations, "password", TextInput::Text(password), usize::MAX);
    violations.into_result().map_err(SeedError::Invalid)?;

    if let Some(existing) = store.find_by_username(username).await? {
        tracing::info!("User '{}' already exists, skipping seed", username);
        return Ok(SeedOutcome::AlreadyExists(existing));
    }

    let hash = hash_password(password, iterations);
    match store.create(username, &hash).await {
        Ok(user) => {
            tracing::info!("Created user '{}' (id {})", user.username, user.id);
            Ok(SeedOutcome::Created(user))
        }
        // Lost a race with a concurrent seed.
        Err(StoreError::Duplicate(_)) => match store.find_by_username(username).await? {
            Some(existing) => Ok(SeedOutcome::AlreadyExists(existing)),
            None => Err(StoreError::Duplicate(format!("User '{}'", username)).into()),
        },
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::user::verify_password;

    #[tokio::test]
    async fn test_seed_twice_creates_one_user() {
        let store = UserStore::new(Database::open_in_memory().unwrap());

        let first = seed_admin(&store, "admin", "123456", 10).await.unwrap();
        let SeedOutcome::Created(user) = first else {
            panic!("first seed should create the user");
        };
        assert!(verify_password("123456", &user.password_hash).unwrap());
        assert!(!verify_password("654321", &user.password_hash).unwrap());

        let second = seed_admin(&store, "admin", "other", 10).await.unwrap();
        let SeedOutcome::AlreadyExists(existing) = second else {
            panic!("second seed should be skipped");
        };
        assert_eq!(existing.id, user.id);
        assert!(verify_password("123456", &existing.password_hash).unwrap());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_rejects_blank_credentials() {
        let store = UserStore::new(Database::open_in_memory().unwrap());
        let err = seed_admin(&store, " ", "", 10).await.unwrap_err();
        let SeedError::Invalid(violations) = err else {
            panic!("expected validation failure");
        };
        assert!(violations.has_field("username"));
        assert!(violations.has_field("password"));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
