use clap::ValueEnum;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Everything except the characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeepLinkMode {
    #[default]
    None,
    Search,
    Paragraph,
    Both,
}

impl DeepLinkMode {
    pub fn wants_search(self) -> bool {
        matches!(self, Self::Search | Self::Both)
    }

    pub fn wants_paragraphs(self) -> bool {
        matches!(self, Self::Paragraph | Self::Both)
    }
}

/// `p4`, `p4-p5` for a consecutive pair, otherwise `p2,p3,p4` ascending.
pub fn paragraph_anchor(ids: &[usize]) -> Option<String> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    match ids.as_slice() {
        [] => None,
        [one] => Some(format!("p{}", one)),
        [lo, hi] if *hi == lo + 1 => Some(format!("p{}-p{}", lo, hi)),
        many => Some(
            many.iter()
                .map(|id| format!("p{}", id))
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

/// Append `?search=` and/or `#p…` to a page URL according to `mode`.
pub fn build_deep_url(page_url: &str, phrase: &str, ids: &[usize], mode: DeepLinkMode) -> String {
    let mut url = page_url.to_string();
    if mode.wants_search() {
        url.push_str("?search=");
        url.extend(utf8_percent_encode(phrase, COMPONENT));
    }
    if mode.wants_paragraphs() {
        if let Some(anchor) = paragraph_anchor(ids) {
            url.push('#');
            url.push_str(&anchor);
        }
    }
    url
}
