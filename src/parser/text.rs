use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Replace every tag with a space, collapse whitespace runs, trim.
pub fn strip_html(input: &str) -> String {
    let untagged = TAG_RE.replace_all(input, " ");
    WS_RE.replace_all(&untagged, " ").trim().to_string()
}

/// Canonical comparison form: markup stripped, whitespace collapsed, lowercased.
/// Applied identically to paragraphs and snippets.
pub fn normalize(input: &str) -> String {
    strip_html(input).to_lowercase()
}

/// Collapse whitespace without touching markup (display only).
pub fn collapse_whitespace(input: &str) -> String {
    WS_RE.replace_all(input, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_tags_and_whitespace() {
        assert_eq!(
            normalize("  The <em>Divine</em>\n\n  Life<br />"),
            "the divine life"
        );
    }

    #[test]
    fn tag_boundaries_become_spaces() {
        assert_eq!(strip_html("one<br>two"), "one two");
    }

    #[test]
    fn empty_and_markup_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("<p></p>\n"), "");
    }

    #[test]
    fn collapse_keeps_markup() {
        assert_eq!(collapse_whitespace(" a <b>x</b>\n\tc "), "a <b>x</b> c");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in ".{0,200}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_markup(s in "[a-zA-Z <>/\n\t.,]{0,120}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
