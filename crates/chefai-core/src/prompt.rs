//! Prompt construction for recipe generation.
//!
//! The prompt asks for seven parts separated by [`DELIMITER`], in the order
//! that [`crate::response::parse_response`] expects them.

use crate::response::DELIMITER;

/// Build the recipe-post prompt for `keyword`, written in the voice of
/// `author`.
pub fn build_recipe_prompt(keyword: &str, author: &str) -> String {
    let parts = [
        format!(
            "PART 1: Post content (HTML)\n\
             - Open with an original, engaging introduction in the voice of chef {author}.\n\
             - Add a 'Recipe Video' subheading and a YouTube iframe (use a video relevant to '{keyword}').\n\
             - Add an 'Ingredients' section (unordered list <ul>) and a 'Method' section (ordered list <ol>).\n\
             - Include a 'Chef's Tips' section with useful advice.\n\
             - Add a 'Frequently Asked Questions (FAQ)' section with 2 questions and answers.\n\
             - Include TWO internal link placeholders in the text: \
             '[ANCHOR_LINK_1:suggested-anchor-text]' and '[ANCHOR_LINK_2:other-anchor-text]'."
        ),
        format!(
            "PART 2: Meta title (at most 60 characters)\n\
             - Write an SEO-optimised meta title for '{keyword}'."
        ),
        format!(
            "PART 3: Meta description (at most 155 characters)\n\
             - Write a click-worthy meta description for '{keyword}'."
        ),
        "PART 4: Tags (5 to 10, comma-separated)\n\
         - List the most relevant tags for the recipe."
            .to_string(),
        format!(
            "PART 5: Recipe schema (JSON-LD)\n\
             - Produce a complete Schema.org 'Recipe' JSON-LD, including an 'author' field named '{author}'."
        ),
        "PART 6: FAQPage schema (JSON-LD)\n\
         - Produce a Schema.org 'FAQPage' JSON-LD based on the questions from PART 1."
            .to_string(),
        "PART 7: VideoObject schema (JSON-LD)\n\
         - Produce a Schema.org 'VideoObject' JSON-LD matching the video from PART 1."
            .to_string(),
    ];

    let header = format!(
        "You are an SEO specialist for recipes and a professional chef. Write a complete, \
         optimised blog post for the keyword: '{keyword}'.\n\
         The recipe author is '{author}'.\n\
         The answer MUST be split into 7 parts, separated EXACTLY by '{DELIMITER}'. \
         Follow the order and format strictly."
    );

    let body = parts.join(&format!("\n\n{DELIMITER}\n\n"));
    format!("{header}\n\n{body}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_keyword_and_author() {
        let prompt = build_recipe_prompt("carrot cake", "Chef Ana");
        assert!(prompt.contains("'carrot cake'"));
        assert!(prompt.contains("chef Chef Ana"));
        assert!(prompt.contains("'author' field named 'Chef Ana'"));
    }

    #[test]
    fn prompt_separates_seven_parts() {
        let prompt = build_recipe_prompt("soup", "Chef");
        // One mention in the instructions plus six separators.
        assert_eq!(prompt.matches(DELIMITER).count(), 7);
        for n in 1..=7 {
            assert!(prompt.contains(&format!("PART {n}:")), "missing PART {n}");
        }
    }

    #[test]
    fn prompt_requests_both_anchor_placeholders() {
        let prompt = build_recipe_prompt("soup", "Chef");
        assert!(prompt.contains("[ANCHOR_LINK_1:"));
        assert!(prompt.contains("[ANCHOR_LINK_2:"));
    }
}
