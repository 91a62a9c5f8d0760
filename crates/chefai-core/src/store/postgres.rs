use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use chefai_db::queries::posts::{self, NewPost};
use chefai_db::queries::{post_meta, tags};

use super::{
    DraftStore, META_GENERATED, META_SCHEMA_FAQ, META_SCHEMA_RECIPE, META_SCHEMA_VIDEO,
    META_SEO_DESCRIPTION, META_SEO_TITLE,
};
use crate::draft::{DraftPost, SchemaBlocks};

/// [`DraftStore`] backed by the chefai PostgreSQL schema.
#[derive(Debug, Clone)]
pub struct PgDraftStore {
    pool: PgPool,
}

impl PgDraftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftStore for PgDraftStore {
    async fn insert_draft(&self, draft: &DraftPost) -> Result<Uuid> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin transaction")?;

        let post = posts::insert_post(
            &mut tx,
            &NewPost {
                title: &draft.title,
                content: &draft.content,
                status: draft.status,
                post_type: &draft.post_type,
                author_id: draft.author_id,
            },
        )
        .await?;

        let linked = tags::set_post_tags(&mut tx, post.id, &draft.tags).await?;

        let meta = [
            (META_GENERATED, "1"),
            (META_SEO_TITLE, draft.meta_title.as_str()),
            (META_SEO_DESCRIPTION, draft.meta_description.as_str()),
            (META_SCHEMA_RECIPE, draft.schemas.recipe.as_str()),
            (META_SCHEMA_FAQ, draft.schemas.faq.as_str()),
            (META_SCHEMA_VIDEO, draft.schemas.video.as_str()),
        ];
        for (key, value) in meta {
            post_meta::set_meta(&mut tx, post.id, key, value).await?;
        }

        tx.commit().await.context("failed to commit draft")?;

        info!(
            post_id = %post.id,
            title = %post.title,
            tags = linked.len(),
            "draft stored"
        );
        Ok(post.id)
    }

    async fn schema_blocks(&self, post_id: Uuid) -> Result<Option<SchemaBlocks>> {
        if posts::get_post(&self.pool, post_id).await?.is_none() {
            return Ok(None);
        }

        let mut blocks = SchemaBlocks::default();
        for meta in post_meta::list_meta(&self.pool, post_id).await? {
            match meta.meta_key.as_str() {
                META_SCHEMA_RECIPE => blocks.recipe = meta.meta_value,
                META_SCHEMA_FAQ => blocks.faq = meta.meta_value,
                META_SCHEMA_VIDEO => blocks.video = meta.meta_value,
                _ => {}
            }
        }
        Ok(Some(blocks))
    }
}
