//! Summary numbers for the operator: post counts and recent generations.

use anyhow::Result;
use sqlx::PgPool;

use chefai_db::models::Post;
use chefai_db::queries::posts::{self, PostCounts};

use crate::draft::POST_TYPE;
use crate::store::META_GENERATED;

/// How many recent generated posts the dashboard lists.
pub const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub counts: PostCounts,
    /// Newest first, at most [`RECENT_LIMIT`].
    pub recent: Vec<Post>,
}

pub async fn load_dashboard(pool: &PgPool) -> Result<Dashboard> {
    let counts = posts::count_posts_by_status(pool, POST_TYPE).await?;
    let recent = posts::list_recent_with_meta(pool, META_GENERATED, RECENT_LIMIT).await?;
    Ok(Dashboard { counts, recent })
}
