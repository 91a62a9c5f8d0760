//! Database query functions for the `posts` table.

use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Post, PostStatus};

/// Parameters for inserting a new post row.
#[derive(Debug, Clone)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub status: PostStatus,
    pub post_type: &'a str,
    pub author_id: i64,
}

/// Per-status post counts for one post type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostCounts {
    pub draft: i64,
    pub pending: i64,
    pub publish: i64,
}

impl PostCounts {
    /// Published plus draft posts. Pending posts are reported separately.
    pub fn total(&self) -> i64 {
        self.publish + self.draft
    }
}

/// Insert a new post row. Returns the inserted post with server-generated
/// defaults (id, created_at).
pub async fn insert_post(conn: &mut PgConnection, new: &NewPost<'_>) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        "INSERT INTO posts (title, content, status, post_type, author_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(new.title)
    .bind(new.content)
    .bind(new.status)
    .bind(new.post_type)
    .bind(new.author_id)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to insert post {:?}", new.title))?;

    Ok(post)
}

/// Fetch a post by its ID.
pub async fn get_post(pool: &PgPool, id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch post")?;

    Ok(post)
}

/// Count posts of the given type, grouped by status.
pub async fn count_posts_by_status(pool: &PgPool, post_type: &str) -> Result<PostCounts> {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT status, COUNT(*) AS cnt \
         FROM posts \
         WHERE post_type = $1 \
         GROUP BY status",
    )
    .bind(post_type)
    .fetch_all(pool)
    .await
    .context("failed to count posts")?;

    let mut counts = PostCounts::default();
    for (status, count) in rows {
        match status.parse::<PostStatus>() {
            Ok(PostStatus::Draft) => counts.draft = count,
            Ok(PostStatus::Pending) => counts.pending = count,
            Ok(PostStatus::Publish) => counts.publish = count,
            Err(_) => {}
        }
    }
    Ok(counts)
}

/// List the most recent posts carrying the given metadata key, newest first.
pub async fn list_recent_with_meta(
    pool: &PgPool,
    meta_key: &str,
    limit: i64,
) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT p.* FROM posts p \
         WHERE EXISTS ( \
             SELECT 1 FROM post_meta m WHERE m.post_id = p.id AND m.meta_key = $1 \
         ) \
         ORDER BY p.created_at DESC \
         LIMIT $2",
    )
    .bind(meta_key)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("failed to list recent posts")?;

    Ok(posts)
}
