//! Database query functions for the `tags` and `post_tags` tables.

use anyhow::{Context, Result};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::Tag;

/// Derive a URL slug from a tag name: lowercased alphanumeric runs joined
/// by single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Replace the tags on a post with `names`.
///
/// Tags are created on first use and matched by slug afterwards. Names that
/// slugify to an empty string are skipped. Returns the tags now linked to
/// the post, in input order without duplicates.
pub async fn set_post_tags(
    conn: &mut PgConnection,
    post_id: Uuid,
    names: &[String],
) -> Result<Vec<Tag>> {
    sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut *conn)
        .await
        .context("failed to clear post tags")?;

    let mut linked: Vec<Tag> = Vec::with_capacity(names.len());
    for name in names {
        let slug = slugify(name);
        if slug.is_empty() || linked.iter().any(|t| t.slug == slug) {
            continue;
        }

        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug \
             RETURNING *",
        )
        .bind(name.trim())
        .bind(&slug)
        .fetch_one(&mut *conn)
        .await
        .with_context(|| format!("failed to upsert tag {name:?}"))?;

        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await
            .with_context(|| format!("failed to link tag {name:?} to post {post_id}"))?;

        linked.push(tag);
    }

    Ok(linked)
}

/// List the tags linked to a post, ordered by name.
pub async fn list_tags_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Tag>> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.* FROM tags t \
         JOIN post_tags pt ON pt.tag_id = t.id \
         WHERE pt.post_id = $1 \
         ORDER BY t.name",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
    .context("failed to list tags for post")?;

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_joins_words_with_hyphens() {
        assert_eq!(slugify("Carrot Cake"), "carrot-cake");
        assert_eq!(slugify("  easy   dessert! "), "easy-dessert");
    }

    #[test]
    fn slugify_keeps_accented_letters() {
        assert_eq!(slugify("Bolo de Cenoura Fácil"), "bolo-de-cenoura-fácil");
    }

    #[test]
    fn slugify_of_punctuation_is_empty() {
        assert_eq!(slugify(" -- "), "");
    }
}
