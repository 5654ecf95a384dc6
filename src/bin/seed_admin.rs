//! Creates the administrative user.
//!
//! Reads `DATABASE_PATH`, `ADMIN_USERNAME`, `ADMIN_PASSWORD` and
//! `PASSWORD_HASH_ITERATIONS` from the environment. Running it again is a
//! no-op once the user exists.

use task_api::config::Config;
use task_api::db::Database;
use task_api::user::{seed_admin, SeedOutcome, UserStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_api=info,seed_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let password = config.admin_password()?;

    let db = Database::open(config.database_path.clone()).await?;
    let users = UserStore::new(db);

    match seed_admin(
        &users,
        &config.admin_username,
        password,
        config.hash_iterations,
    )
    .await?
    {
        SeedOutcome::Created(user) => info!(
            "Seeded user '{}' into {}",
            user.username,
            config.database_path.display()
        ),
        SeedOutcome::AlreadyExists(user) => info!(
            "User '{}' already present (created {}), nothing to do",
            user.username, user.created_at
        ),
    }
    info!("{} user(s) in store", users.count().await?);

    Ok(())
}
