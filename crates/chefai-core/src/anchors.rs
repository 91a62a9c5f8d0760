//! Internal-link placeholder substitution.
//!
//! The model marks where internal links belong with
//! `[ANCHOR_LINK_1:anchor text]` and `[ANCHOR_LINK_2:anchor text]`. Each
//! placeholder becomes an `<a>` element pointing at the operator-supplied
//! URL.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::sanitize::esc_url;

static ANCHOR_1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[ANCHOR_LINK_1:(.*?)\]").expect("valid regex"));
static ANCHOR_2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[ANCHOR_LINK_2:(.*?)\]").expect("valid regex"));

/// Replace both anchor placeholders in `content`.
///
/// A placeholder is only replaced when its link is non-empty; otherwise it
/// is left in place for the editor to deal with.
pub fn apply_anchor_links(content: &str, link1: &str, link2: &str) -> String {
    let with_first = replace_anchor(&ANCHOR_1_RE, content, link1);
    replace_anchor(&ANCHOR_2_RE, &with_first, link2)
}

fn replace_anchor(re: &Regex, content: &str, link: &str) -> String {
    if link.is_empty() {
        return content.to_string();
    }
    let href = esc_url(link);
    re.replace_all(content, |caps: &Captures<'_>| {
        format!("<a href=\"{href}\">{}</a>", &caps[1])
    })
    .into_owned()
}
