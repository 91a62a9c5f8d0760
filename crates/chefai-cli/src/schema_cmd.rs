//! `chefai schema` command: print the JSON-LD footer a single-post view of
//! the given post would carry.

use anyhow::{Context, Result};
use sqlx::PgPool;

use chefai_core::render::footer_for_post;
use chefai_core::store::PgDraftStore;

use crate::show_cmd::parse_post_id;

/// Run the schema command.
pub async fn run_schema(pool: &PgPool, post_id_str: &str) -> Result<()> {
    let post_id = parse_post_id(post_id_str)?;
    let store = PgDraftStore::new(pool.clone());

    let footer = footer_for_post(&store, post_id)
        .await?
        .with_context(|| format!("post {post_id} not found"))?;

    print!("{footer}");
    Ok(())
}
