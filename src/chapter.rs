use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ChapterError;
use crate::parser::markdown::{chapter_paragraphs, ChapterResponse};

/// Fetch one chapter and render it into the page's paragraph list.
pub async fn fetch_chapter_paragraphs(
    client: &ApiClient,
    chapter_path: &str,
) -> Result<Vec<String>, ChapterError> {
    let url = client.api_url(chapter_path);
    let query = [
        ("source", String::new()),
        ("onlyOrignalText", "false".to_string()),
    ];
    let response: ChapterResponse = client.get_json(&url, &query).await?;
    let content = response
        .into_content()
        .ok_or_else(|| ChapterError::NoContent(url.clone()))?;
    Ok(chapter_paragraphs(&content))
}

/// Per-run chapter paragraphs keyed by chapter path. `None` marks a chapter
/// that could not be fetched or had no content.
#[derive(Debug, Default)]
pub struct ChapterCache {
    chapters: HashMap<String, Option<Vec<String>>>,
}

impl ChapterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every distinct, not yet cached path concurrently and record the
    /// outcomes once all of them have settled.
    pub async fn prefetch<'a, I>(&mut self, client: &ApiClient, paths: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let pending: Vec<&str> = paths
            .into_iter()
            .filter(|p| !p.is_empty() && !self.contains(p))
            .filter(|p| seen.insert(*p))
            .collect();
        if pending.is_empty() {
            return;
        }

        info!("Fetching {} chapters for paragraph matching...", pending.len());
        let pb = ProgressBar::new(pending.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} chapters")
        {
            pb.set_style(style.progress_chars("=> "));
        }

        let fetches = pending.iter().map(|path| {
            let pb = pb.clone();
            async move {
                let outcome = fetch_chapter_paragraphs(client, path).await;
                pb.inc(1);
                (*path, outcome)
            }
        });
        let outcomes = join_all(fetches).await;
        pb.finish_and_clear();

        for (path, outcome) in outcomes {
            let paragraphs = match outcome {
                Ok(paragraphs) => {
                    info!("  {}: {} paragraphs", path, paragraphs.len());
                    Some(paragraphs)
                }
                Err(e) => {
                    warn!("  {}: FAILED ({})", path, e);
                    None
                }
            };
            self.chapters.insert(path.to_string(), paragraphs);
        }
    }

    /// Paragraphs for an available chapter.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.chapters.get(path)?.as_deref()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.chapters.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }
}
