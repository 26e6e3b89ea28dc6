use tracing::{debug, warn};

use crate::chapter::ChapterCache;
use crate::citation::{to_citation, Citation};
use crate::client::ApiClient;
use crate::deeplink::{build_deep_url, DeepLinkMode};
use crate::parser;
use crate::parser::snippet::extract_search_hit;
use crate::search::SearchResult;

/// Deep link and citation for one search result.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub deep_url: Option<String>,
    pub citation: Citation,
}

/// Build deep links and citations for a batch of raw (unstripped) results.
///
/// Paragraph modes fetch every distinct chapter up front; a chapter that is
/// unavailable or has no matching paragraph just loses its anchor.
pub async fn enrich(
    client: &ApiClient,
    results: &[SearchResult],
    query: &str,
    mode: DeepLinkMode,
    cache: &mut ChapterCache,
) -> Vec<Enrichment> {
    if mode.wants_paragraphs() {
        cache
            .prefetch(client, results.iter().map(|r| r.url.as_str()))
            .await;
    }

    results
        .iter()
        .map(|r| {
            let deep_url = deep_url_for(r, client.base_url(), query, mode, cache);
            let citation = to_citation(r, client.base_url(), deep_url.clone());
            Enrichment { deep_url, citation }
        })
        .collect()
}

fn deep_url_for(
    result: &SearchResult,
    base_url: &str,
    query: &str,
    mode: DeepLinkMode,
    cache: &ChapterCache,
) -> Option<String> {
    if mode == DeepLinkMode::None {
        return None;
    }
    let page_url = result.page_url(base_url)?;

    if !mode.wants_paragraphs() {
        let hit = extract_search_hit(&result.snippet, query);
        return Some(build_deep_url(&page_url, &hit, &[], mode));
    }

    let (hit, ids) = match cache.get(&result.url) {
        Some(paragraphs) => {
            let (hit, ids) = parser::paragraph_ids(paragraphs, &result.snippet, query);
            if ids.is_empty() {
                let preview: String = hit.chars().take(50).collect();
                warn!("No paragraph match for {:?}... in {}", preview, result.url);
            } else {
                debug!("{} matched paragraphs {:?}", result.url, ids);
            }
            (hit, ids)
        }
        None => (extract_search_hit(&result.snippet, query), Vec::new()),
    };

    Some(build_deep_url(&page_url, &hit, &ids, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::chapter::tests::spawn_site;
    use crate::search::PathItem;

    fn result(url: &str, snippet: &str) -> SearchResult {
        SearchResult {
            url: url.into(),
            title: "T".into(),
            snippet: snippet.into(),
            path: vec![PathItem {
                t: "Sri Aurobindo".into(),
                u: None,
            }],
            searched_in: None,
        }
    }

    #[tokio::test]
    async fn both_mode_links_matching_paragraph() {
        let base = spawn_site(Arc::new(AtomicUsize::new(0))).await;
        let client = ApiClient::new(&base).unwrap();
        let mut cache = ChapterCache::new();
        let results = vec![result("/flat", "This is the <strong>divine life</strong>, the aim")];

        let out = enrich(&client, &results, "divine life", DeepLinkMode::Both, &mut cache).await;
        assert_eq!(
            out[0].deep_url.as_deref(),
            Some(format!("{}/flat?search=divine%20life%2C#p3", base).as_str())
        );
        assert_eq!(out[0].citation.deep_url, out[0].deep_url);
        assert_eq!(out[0].citation.author, "Sri Aurobindo");
    }

    #[tokio::test]
    async fn search_mode_fetches_nothing() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_site(hits.clone()).await;
        let client = ApiClient::new(&base).unwrap();
        let mut cache = ChapterCache::new();
        let results = vec![result("/flat", "plain snippet")];

        let out = enrich(&client, &results, "divine life", DeepLinkMode::Search, &mut cache).await;
        assert_eq!(
            out[0].deep_url.as_deref(),
            Some(format!("{}/flat?search=divine%20life", base).as_str())
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(!cache.contains("/flat"));
    }

    #[tokio::test]
    async fn unavailable_chapter_degrades_to_plain_url() {
        let base = spawn_site(Arc::new(AtomicUsize::new(0))).await;
        let client = ApiClient::new(&base).unwrap();
        let mut cache = ChapterCache::new();
        let results = vec![
            result("/broken", "<strong>race</strong>"),
            result("/cwsa/21/the-human-aspiration", "ideals of the <strong>race</strong> are"),
            result("", "<strong>race</strong>"),
        ];

        let out = enrich(&client, &results, "race", DeepLinkMode::Paragraph, &mut cache).await;
        assert_eq!(out[0].deep_url.as_deref(), Some(format!("{}/broken", base).as_str()));
        assert_eq!(
            out[1].deep_url.as_deref(),
            Some(format!("{}/cwsa/21/the-human-aspiration#p2", base).as_str())
        );
        assert!(out[2].deep_url.is_none());
        assert_eq!(out[2].citation.url, "");
    }

    #[tokio::test]
    async fn none_mode_has_no_deep_urls() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let mut cache = ChapterCache::new();
        let results = vec![result("/flat", "<strong>x</strong>")];
        let out = enrich(&client, &results, "x", DeepLinkMode::None, &mut cache).await;
        assert!(out[0].deep_url.is_none());
        assert_eq!(out[0].citation.url, "http://127.0.0.1:1/flat");
        assert_eq!(cache.len(), 0);
    }
}
