//! Connection pool, migrations, and database bootstrap for `chefai db-init`.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

use crate::config::DbConfig;

/// Migrations embedded at compile time from `crates/chefai-db/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Tables created by the migrations, in the order `db-init` reports them.
pub const TABLES: [&str; 4] = ["posts", "post_meta", "tags", "post_tags"];

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a connection pool.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to database at {}", config.database_url))?;
    Ok(pool)
}

/// Run all pending embedded migrations against the pool.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    info!(migrations = MIGRATOR.iter().count(), "schema up to date");
    Ok(())
}

/// Reject database names that cannot be used unquoted in `CREATE DATABASE`.
///
/// Only ASCII letters, digits, and `_` are accepted, and the name may not
/// start with a digit.
pub fn validate_database_name(name: &str) -> Result<()> {
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("database name {name:?} must be letters, digits, and underscores");
    }
    Ok(())
}

/// Ensure the target database exists, creating it if necessary.
///
/// The name is validated before anything is sent to the server. The check
/// and the `CREATE DATABASE` go through the `postgres` maintenance database
/// on the same host.
pub async fn ensure_database_exists(config: &DbConfig) -> Result<()> {
    let db_name = config
        .database_name()
        .context("could not determine database name from URL")?;
    validate_database_name(db_name)?;

    let maintenance_url = config.maintenance_url();
    let maint_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&maintenance_url)
        .await
        .with_context(|| format!("failed to connect to maintenance database at {maintenance_url}"))?;

    let result = create_if_missing(&maint_pool, db_name).await;
    maint_pool.close().await;
    result
}

async fn create_if_missing(maint_pool: &PgPool, db_name: &str) -> Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(maint_pool)
            .await
            .context("failed to query pg_database")?;

    if exists {
        info!(db = db_name, "database already exists");
        return Ok(());
    }

    let stmt = format!("CREATE DATABASE {db_name}");
    maint_pool
        .execute(stmt.as_str())
        .await
        .with_context(|| format!("failed to create database {db_name}"))?;
    info!(db = db_name, "database created");
    Ok(())
}

/// Row count for each of the chefai tables, in [`TABLES`] order.
///
/// Fails with a pointer to `chefai db-init` when a table is missing.
pub async fn table_counts(pool: &PgPool) -> Result<Vec<(String, i64)>> {
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT tablename::text FROM pg_tables \
         WHERE schemaname = 'public' AND tablename = ANY($1)",
    )
    .bind(&TABLES[..])
    .fetch_all(pool)
    .await
    .context("failed to list tables")?;

    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        if !present.iter().any(|t| t == table) {
            bail!("table {table} is missing; run `chefai db-init` first");
        }
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to count rows in {table}"))?;
        counts.push((table.to_string(), count));
    }
    Ok(counts)
}
