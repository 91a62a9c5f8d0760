//! Persistence seam for generated drafts.
//!
//! The generator only sees [`DraftStore`]; [`PgDraftStore`] is the
//! PostgreSQL-backed implementation.

mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::draft::{DraftPost, SchemaBlocks};

pub use postgres::PgDraftStore;

/// Marks a post as produced by the generator.
pub const META_GENERATED: &str = "_is_chefai_recipe";
pub const META_SEO_TITLE: &str = "_seo_title";
pub const META_SEO_DESCRIPTION: &str = "_seo_metadesc";
pub const META_SCHEMA_RECIPE: &str = "_chefai_schema_recipe";
pub const META_SCHEMA_FAQ: &str = "_chefai_schema_faq";
pub const META_SCHEMA_VIDEO: &str = "_chefai_schema_video";

/// Where drafts and their metadata are kept.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Persist `draft` with its tags and metadata. Returns the new post ID.
    ///
    /// Either everything is stored or nothing is.
    async fn insert_draft(&self, draft: &DraftPost) -> Result<Uuid>;

    /// Stored JSON-LD for a post, or `None` if the post does not exist.
    /// Missing blocks come back empty.
    async fn schema_blocks(&self, post_id: Uuid) -> Result<Option<SchemaBlocks>>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn DraftStore) {}
};
