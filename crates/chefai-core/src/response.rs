//! Parser for the delimited LLM response.
//!
//! The response carries seven parts separated by [`DELIMITER`]:
//!
//! ```text
//! content <!--|||--> meta title <!--|||--> meta description <!--|||-->
//! tags <!--|||--> recipe JSON-LD <!--|||--> FAQ JSON-LD <!--|||--> video JSON-LD
//! ```
//!
//! Parts past the seventh are ignored.

use thiserror::Error;

/// Literal separator between response parts.
pub const DELIMITER: &str = "<!--|||-->";

/// Number of parts a well-formed response contains.
pub const PART_COUNT: usize = 7;

/// The response did not contain enough parts.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("LLM response has an invalid format: expected 7 parts separated by \"<!--|||-->\", found {found}")]
pub struct ResponseFormatError {
    /// Number of parts actually found.
    pub found: usize,
}

/// The seven fields of a parsed response, each trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub content: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Comma-separated tags, trimmed, empties removed.
    pub tags: Vec<String>,
    pub schema_recipe: String,
    pub schema_faq: String,
    pub schema_video: String,
}

/// Split `raw` on [`DELIMITER`] into its seven fields.
///
/// Fewer than six delimiters is a [`ResponseFormatError`].
pub fn parse_response(raw: &str) -> Result<ParsedResponse, ResponseFormatError> {
    let parts: Vec<&str> = raw.split(DELIMITER).map(str::trim).collect();
    if parts.len() < PART_COUNT {
        return Err(ResponseFormatError { found: parts.len() });
    }

    Ok(ParsedResponse {
        content: parts[0].to_string(),
        meta_title: parts[1].to_string(),
        meta_description: parts[2].to_string(),
        tags: split_tags(parts[3]),
        schema_recipe: parts[4].to_string(),
        schema_faq: parts[5].to_string(),
        schema_video: parts[6].to_string(),
    })
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
