//! Database module
//!
//! Database connection, migration, and schema checks.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Columns the account store reads and writes
const REQUIRED_COLUMNS: &[&str] = &[
    "username",
    "password",
    "about",
    "age",
    "disabled",
    "created_at",
    "updated_at",
];

/// Open a bounded connection pool from a `postgres://` URL
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options: PgConnectOptions = database_url.parse()?;
    connect_with(options, max_connections, min_connections).await
}

/// Open a bounded connection pool and check it answers
pub async fn connect_with(
    options: PgConnectOptions,
    max_connections: u32,
    min_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    verify_connection(&pool).await?;
    Ok(pool)
}

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Check the `users` table exists with every column the store needs
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::TEXT
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = 'users'
        "#,
    )
    .fetch_all(pool)
    .await?;

    if columns.is_empty() {
        tracing::error!("Required table 'users' does not exist");
        return Ok(false);
    }

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            tracing::error!("Required column 'users.{}' does not exist", required);
            return Ok(false);
        }
    }

    Ok(true)
}
