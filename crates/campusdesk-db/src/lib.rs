//! # Campusdesk DB
//!
//! Database pool and migrations for the Campusdesk API.
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary at compile time, so both the server and the CLI apply the
//! exact same set of migrations.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_config::DatabaseConfig;
//! use campusdesk_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use campusdesk_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Migrations embedded from `<workspace>/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be created once during
/// startup and then shared through the application state.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

/// Applies every pending embedded migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    info!(count = MIGRATOR.iter().count(), "Applying database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
