//! `chefai show` command: a stored post with its metadata and tags.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use chefai_db::queries::{post_meta, posts, tags};

/// Parse a post ID argument.
pub fn parse_post_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input.trim()).with_context(|| format!("invalid post ID: {input}"))
}

/// Run the show command.
pub async fn run_show(pool: &PgPool, post_id_str: &str) -> Result<()> {
    let post_id = parse_post_id(post_id_str)?;

    let post = posts::get_post(pool, post_id)
        .await?
        .with_context(|| format!("post {post_id} not found"))?;

    println!("Post: {} ({})", post.title, post.id);
    println!("Status: {}", post.status);
    println!("Type: {}", post.post_type);
    println!("Author: {}", post.author_id);
    println!("Created: {}", post.created_at.format("%Y-%m-%d %H:%M:%S UTC"));

    let tag_names: Vec<String> = tags::list_tags_for_post(pool, post_id)
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect();
    if !tag_names.is_empty() {
        println!("Tags: {}", tag_names.join(", "));
    }
    println!();

    let meta = post_meta::list_meta(pool, post_id).await?;
    if !meta.is_empty() {
        println!("Metadata:");
        for m in &meta {
            let value = m.meta_value.replace('\n', "\\n");
            println!("  {} = {}", m.meta_key, value);
        }
        println!();
    }

    println!("{}", post.content);
    Ok(())
}
