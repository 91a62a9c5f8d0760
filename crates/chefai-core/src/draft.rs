//! Assembly of a draft post from a parsed LLM response.

use chefai_db::models::PostStatus;

use crate::anchors::apply_anchor_links;
use crate::response::ParsedResponse;
use crate::sanitize::{kses_post, sanitize_text_field, sanitize_textarea_field};

/// Post type every generated draft is stored under.
pub const POST_TYPE: &str = "post";

/// The three JSON-LD blocks stored alongside a post, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaBlocks {
    pub recipe: String,
    pub faq: String,
    pub video: String,
}

/// A post ready to be persisted, with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPost {
    pub title: String,
    /// Filtered HTML body.
    pub content: String,
    pub status: PostStatus,
    pub post_type: String,
    pub author_id: i64,
    pub meta_title: String,
    pub meta_description: String,
    pub tags: Vec<String>,
    pub schemas: SchemaBlocks,
}

/// Turn a parsed response into a draft titled `keyword`.
///
/// Anchor placeholders are resolved against `link1`/`link2` before the body
/// goes through [`kses_post`], so the generated links are filtered like any
/// other markup.
pub fn assemble_draft(
    parsed: ParsedResponse,
    keyword: &str,
    link1: &str,
    link2: &str,
    author_id: i64,
) -> DraftPost {
    let content = kses_post(&apply_anchor_links(&parsed.content, link1, link2));

    let tags = parsed
        .tags
        .iter()
        .map(|t| sanitize_text_field(t))
        .filter(|t| !t.is_empty())
        .collect();

    DraftPost {
        title: keyword.to_string(),
        content,
        status: PostStatus::Draft,
        post_type: POST_TYPE.to_string(),
        author_id,
        meta_title: sanitize_text_field(&parsed.meta_title),
        meta_description: sanitize_textarea_field(&parsed.meta_description),
        tags,
        schemas: SchemaBlocks {
            recipe: parsed.schema_recipe,
            faq: parsed.schema_faq,
            video: parsed.schema_video,
        },
    }
}
