pub mod markdown;
pub mod matcher;
pub mod snippet;
pub mod text;

use tracing::debug;

use matcher::MatchPass;

/// Snippet → matched phrase → paragraph ids. Returns the phrase used for matching
/// alongside the (possibly empty) 1-indexed ids.
pub fn paragraph_ids(paragraphs: &[String], raw_snippet: &str, query: &str) -> (String, Vec<usize>) {
    let hit = snippet::extract_search_hit(raw_snippet, query);
    if hit.is_empty() {
        return (hit, Vec::new());
    }
    let found = matcher::match_paragraphs(paragraphs, &hit);
    if found.pass == Some(MatchPass::Fallback) {
        debug!("{:?} matched {:?} only through the interior excerpt", hit, found.ids);
    }
    (hit, found.ids)
}
