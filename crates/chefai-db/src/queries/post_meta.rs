//! Database query functions for the `post_meta` table.

use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::PostMeta;

/// Set a metadata value on a post, replacing any previous value for the key.
pub async fn set_meta(
    conn: &mut PgConnection,
    post_id: Uuid,
    meta_key: &str,
    meta_value: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO post_meta (post_id, meta_key, meta_value) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (post_id, meta_key) DO UPDATE SET meta_value = EXCLUDED.meta_value",
    )
    .bind(post_id)
    .bind(meta_key)
    .bind(meta_value)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("failed to set meta {meta_key:?} on post {post_id}"))?;

    Ok(())
}

/// Fetch a single metadata value.
pub async fn get_meta(pool: &PgPool, post_id: Uuid, meta_key: &str) -> Result<Option<String>> {
    let value: Option<(String,)> =
        sqlx::query_as("SELECT meta_value FROM post_meta WHERE post_id = $1 AND meta_key = $2")
            .bind(post_id)
            .bind(meta_key)
            .fetch_optional(pool)
            .await
            .context("failed to fetch post meta")?;

    Ok(value.map(|(v,)| v))
}

/// List all metadata for a post, ordered by key.
pub async fn list_meta(pool: &PgPool, post_id: Uuid) -> Result<Vec<PostMeta>> {
    let rows = sqlx::query_as::<_, PostMeta>(
        "SELECT * FROM post_meta WHERE post_id = $1 ORDER BY meta_key",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("failed to list post meta")?;

    Ok(rows)
}
