//! Text hygiene for user input and model output.
//!
//! Every string that ends up in the database passes through one of these
//! functions first:
//! - [`sanitize_text_field`] for single-line values (keyword, author, tags,
//!   meta title, API keys).
//! - [`sanitize_textarea_field`] for multi-line plain text (meta description).
//! - [`esc_url_raw`] / [`esc_url`] for links.
//! - [`sanitize_hex_color`] for colour settings.
//! - [`kses_post`] for the HTML body of a post.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid regex")
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("valid regex"));
static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static INLINE_WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t ]+").expect("valid regex"));
static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[A-Fa-f0-9]{3}){1,2}$").expect("valid regex"));
/// A tag at the start of the input. It runs to the next `>` or, when the tag
/// is never closed, to the end of the input.
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*?)(/?)(?:>|$)").expect("valid regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("valid regex")
});

/// URL schemes allowed in links and in `href`/`src` attributes.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// Sanitize a single-line text value.
///
/// Strips `<script>`/`<style>` elements and all other tags, encodes a stray
/// `<` as `&lt;`, removes percent-encoded octets, collapses whitespace
/// (line breaks included) to single spaces, and trims.
pub fn sanitize_text_field(input: &str) -> String {
    let stripped = strip_all_tags(input);
    let stripped = remove_octets(&stripped);
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Sanitize a multi-line text value.
///
/// Same as [`sanitize_text_field`] except that line breaks survive. Runs of
/// spaces and tabs inside a line collapse to one space and each line is
/// trimmed.
pub fn sanitize_textarea_field(input: &str) -> String {
    let stripped = strip_all_tags(input);
    let stripped = remove_octets(&stripped);
    let normalized = stripped.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = normalized
        .lines()
        .map(|line| INLINE_WHITESPACE_RE.replace_all(line, " ").trim().to_string())
        .collect();
    lines.join("\n").trim().to_string()
}

fn strip_all_tags(input: &str) -> String {
    if !input.contains('<') {
        return input.to_string();
    }
    let without_scripts = SCRIPT_STYLE_RE.replace_all(input, "");
    let without_comments = COMMENT_RE.replace_all(&without_scripts, "");
    let without_tags = ANY_TAG_RE.replace_all(&without_comments, "");
    without_tags.replace('<', "&lt;")
}

fn remove_octets(input: &str) -> String {
    let mut out = input.to_string();
    while OCTET_RE.is_match(&out) {
        out = OCTET_RE.replace_all(&out, "").into_owned();
    }
    out
}

// ---------------------------------------------------------------------------
// URLs and colours
// ---------------------------------------------------------------------------

/// Validate a URL for storage.
///
/// Returns an empty string for anything that is not an `http`/`https` URL
/// or a root-relative path. A bare host such as `example.com/x` or
/// `localhost:8080/x` gets an `http://` prefix. Characters that never
/// belong in a URL (whitespace, quotes, angle brackets, backslashes) are
/// removed; the rest of the input is kept as written.
pub fn esc_url_raw(input: &str) -> String {
    let cleaned: String = input.trim().chars().filter(|&c| is_url_char(c)).collect();
    if cleaned.is_empty() {
        return String::new();
    }

    if cleaned.starts_with('/') && !cleaned.starts_with("//") {
        return cleaned;
    }

    let candidate = if cleaned.contains("://") || has_scheme(&cleaned) {
        cleaned
    } else {
        format!("http://{cleaned}")
    };

    match url::Url::parse(&candidate) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {
            candidate
        }
        _ => String::new(),
    }
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || !c.is_ascii() && !c.is_control() && !c.is_whitespace()
        || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
}

/// Like [`esc_url_raw`], then escaped for use inside an HTML attribute.
pub fn esc_url(input: &str) -> String {
    escape_attr(&esc_url_raw(input)).replace("&amp;", "&#038;")
}

/// Accept `#rgb` or `#rrggbb` colours; anything else is rejected.
pub fn sanitize_hex_color(input: &str) -> Option<String> {
    let trimmed = input.trim();
    HEX_COLOR_RE
        .is_match(trimmed)
        .then(|| trimmed.to_string())
}

/// Whether `value` starts with `scheme:`. `host:port` is not a scheme.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    if !ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) && is_port_prefix(rest) {
        return false;
    }
    !scheme.is_empty()
        && !scheme.contains(['/', '?', '#', '.'])
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'))
}

fn is_port_prefix(rest: &str) -> bool {
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    (1..=5).contains(&digits) && matches!(rest[digits..].chars().next(), None | Some('/' | '?' | '#'))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Post HTML
// ---------------------------------------------------------------------------

const GLOBAL_ATTRS: &[&str] = &["class", "id", "title", "lang", "dir"];

/// Per-tag attribute allow-list. `None` means the tag itself is not allowed.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "rel", "target", "name"],
        "img" => &["src", "alt", "width", "height", "loading"],
        "td" | "th" => &["colspan", "rowspan", "scope"],
        "ol" => &["start", "reversed", "type"],
        "li" => &["value"],
        "blockquote" | "q" | "del" | "ins" => &["cite"],
        "abbr" | "b" | "br" | "caption" | "cite" | "code" | "dd" | "div" | "dl" | "dt" | "em"
        | "figcaption" | "figure" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "hr" | "i"
        | "p" | "pre" | "s" | "small" | "span" | "strong" | "sub" | "sup" | "table"
        | "tbody" | "tfoot" | "thead" | "tr" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Filter post HTML through an allow-list.
///
/// - `<script>` and `<style>` elements are removed with their content, as
///   are HTML comments.
/// - Tags outside the allow-list are removed; their inner text stays.
/// - Attributes outside the per-tag allow-list are dropped, as are `on*`
///   handlers and `href`/`src` values with a disallowed scheme.
/// - A tag missing its `>` extends to the next `>` (or the end of the
///   input) and is filtered like any other tag.
/// - Every `<` that does not open a tag is written as `&lt;`, so the output
///   contains no markup other than the tags emitted here.
///
/// `<iframe>` is not on the allow-list.
pub fn kses_post(html: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(html, "");
    let without_comments = COMMENT_RE.replace_all(&without_scripts, "");

    let mut out = String::with_capacity(without_comments.len());
    let mut rest: &str = &without_comments;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match HTML_TAG_RE.captures(tail) {
            Some(caps) => {
                out.push_str(&filter_tag(&caps));
                rest = &tail[caps[0].len()..];
            }
            None => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Rebuild one matched tag with only its allowed attributes, or drop it.
fn filter_tag(caps: &Captures<'_>) -> String {
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();
    let Some(tag_attrs) = allowed_attributes(&name) else {
        return String::new();
    };
    if closing {
        return format!("</{name}>");
    }

    let mut out = format!("<{name}");
    for attr in ATTR_RE.captures_iter(&caps[3]) {
        let attr_name = attr[1].to_ascii_lowercase();
        if attr_name.starts_with("on")
            || (!GLOBAL_ATTRS.contains(&attr_name.as_str())
                && !tag_attrs.contains(&attr_name.as_str()))
        {
            continue;
        }
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map_or("", |m| m.as_str());
        if matches!(attr_name.as_str(), "href" | "src" | "cite") && !is_safe_url(value) {
            continue;
        }
        let value = value.replace('"', "&quot;").replace('<', "&lt;");
        out.push_str(&format!(" {attr_name}=\"{value}\""));
    }
    if !caps[4].is_empty() {
        out.push_str(" /");
    }
    out.push('>');
    out
}

/// Whether a URL attribute value uses an allowed scheme (or none at all).
fn is_safe_url(value: &str) -> bool {
    let normalized: String = value
        .replace("&#58;", ":")
        .replace("&#x3a;", ":")
        .replace("&colon;", ":")
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.find(':') {
        None => true,
        Some(colon) => {
            let before = &normalized[..colon];
            if before.contains(['/', '?', '#']) {
                return true;
            }
            ALLOWED_SCHEMES.contains(&before)
        }
    }
}
