//! Page-view rendering of stored JSON-LD.

use anyhow::Result;
use uuid::Uuid;

use crate::draft::SchemaBlocks;
use crate::store::DraftStore;

/// What kind of page is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// A single post.
    Single,
    /// Anything else: archives, home page, search results.
    Listing,
}

/// Footer markup for a page view.
///
/// On a single-post view each non-empty block is emitted as
/// `"\n" + block + "\n"`, recipe first, then FAQ, then video. Other views
/// get nothing.
pub fn render_schema_footer(view: PageView, blocks: &SchemaBlocks) -> String {
    if view != PageView::Single {
        return String::new();
    }

    [&blocks.recipe, &blocks.faq, &blocks.video]
        .into_iter()
        .filter(|block| !block.is_empty())
        .map(|block| format!("\n{block}\n"))
        .collect()
}

/// Footer markup for viewing `post_id` on its own page, or `None` if the
/// post does not exist.
pub async fn footer_for_post(store: &dyn DraftStore, post_id: Uuid) -> Result<Option<String>> {
    let blocks = store.schema_blocks(post_id).await?;
    Ok(blocks.map(|b| render_schema_footer(PageView::Single, &b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> SchemaBlocks {
        SchemaBlocks {
            recipe: "R".to_string(),
            faq: String::new(),
            video: "V".to_string(),
        }
    }

    #[test]
    fn single_view_echoes_non_empty_blocks_in_order() {
        assert_eq!(render_schema_footer(PageView::Single, &blocks()), "\nR\n\nV\n");
    }

    #[test]
    fn listing_view_renders_nothing() {
        assert_eq!(render_schema_footer(PageView::Listing, &blocks()), "");
    }

    #[test]
    fn empty_blocks_render_nothing() {
        let empty = SchemaBlocks::default();
        assert_eq!(render_schema_footer(PageView::Single, &empty), "");
    }
}
