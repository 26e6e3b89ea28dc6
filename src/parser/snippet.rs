use std::sync::LazyLock;

use regex::Regex;

use super::text::strip_html;

/// First highlighted span plus one trailing punctuation mark, if any.
static HIGHLIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<strong>(.*?)</strong>([.,;:!?])?").unwrap());

/// Pull the literal matched phrase out of a raw search snippet.
///
/// The search API wraps matches in `<strong>…</strong>`; the text inside is what
/// actually appears on the page. Punctuation that sits right after the closing
/// tag is kept since the page shows it as part of the phrase. Without any
/// highlight the `fallback` (normally the query) comes back unchanged.
pub fn extract_search_hit(raw_snippet: &str, fallback: &str) -> String {
    match HIGHLIGHT_RE.captures(raw_snippet) {
        Some(caps) => {
            let mut hit = strip_html(&caps[1]);
            if let Some(punct) = caps.get(2) {
                hit.push_str(punct.as_str());
            }
            hit
        }
        None => fallback.to_string(),
    }
}
