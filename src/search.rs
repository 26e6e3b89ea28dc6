use anyhow::{Context, Result};
use clap::{ArgAction, Args, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::client::ApiClient;
use crate::deeplink::DeepLinkMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Sri Aurobindo
    Sa,
    /// The Mother
    M,
    #[default]
    Any,
}

impl Author {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sa => "sa",
            Self::M => "m",
            Self::Any => "any",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compilation {
    Cwsa,
    Sabcl,
    Arya,
    Cwm,
    Agenda,
    #[default]
    Any,
}

impl Compilation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cwsa => "cwsa",
            Self::Sabcl => "sabcl",
            Self::Arya => "arya",
            Self::Cwm => "cwm",
            Self::Agenda => "agenda",
            Self::Any => "any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Volumes,
    Compilations,
    Reference,
    Conversation,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volumes => "volumes",
            Self::Compilations => "compilations",
            Self::Reference => "reference",
            Self::Conversation => "conversation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum SortOrder {
    DateAsc,
    DateDesc,
    ScoreAsc,
    ScoreDesc,
    VolumeChapterAsc,
    VolumeChapterDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateAsc => "dateAsc",
            Self::DateDesc => "dateDesc",
            Self::ScoreAsc => "scoreAsc",
            Self::ScoreDesc => "scoreDesc",
            Self::VolumeChapterAsc => "volumeChapterAsc",
            Self::VolumeChapterDesc => "volumeChapterDesc",
        }
    }
}

/// Every recognised search option. Optional flags are only sent upstream when given.
#[derive(Debug, Clone, Args, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text query
    #[arg(long = "q", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub q: String,

    /// Result page (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Restrict to an author
    #[arg(long, value_enum, default_value_t = Author::Any)]
    pub auth: Author,

    /// Restrict to a compilation
    #[arg(long, value_enum, default_value_t = Compilation::Any)]
    pub comp: Compilation,

    /// Restrict to a volume
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,

    /// Exact phrase search
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<bool>,

    /// Match any term instead of all
    #[arg(long = "anyTerm")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_term: Option<bool>,

    /// Search scope
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched: Option<Scope>,

    /// Prefer the priority index
    #[arg(long = "priorityIndex")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_index: Option<bool>,

    /// Sort order
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortby: Option<SortOrder>,

    /// Strip HTML from result snippets
    #[arg(long = "stripHtml", action = ArgAction::Set, default_value_t = false)]
    pub strip_html: bool,

    /// Truncate result snippets to this many characters (0 = no limit)
    #[arg(long = "maxSnippet")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_snippet: Option<usize>,

    /// Deep-link mode for result URLs
    #[arg(long = "deepLink", value_enum, default_value_t = DeepLinkMode::None)]
    pub deep_link: DeepLinkMode,
}

impl SearchParams {
    /// Upstream query parameters, in the order the site sends them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone()), ("page", self.page.to_string())];
        if self.auth != Author::Any {
            pairs.push(("auth", self.auth.as_str().to_string()));
        }
        if self.comp != Compilation::Any {
            pairs.push(("comp", self.comp.as_str().to_string()));
        }
        if let Some(vol) = self.vol.as_ref().filter(|v| !v.is_empty()) {
            pairs.push(("vol", vol.clone()));
        }
        if let Some(phrase) = self.phrase {
            pairs.push(("phrase", phrase.to_string()));
        }
        if let Some(any_term) = self.any_term {
            pairs.push(("anyTerm", any_term.to_string()));
        }
        if let Some(scope) = self.searched {
            pairs.push(("searched", scope.as_str().to_string()));
        }
        if let Some(priority) = self.priority_index {
            pairs.push(("priorityIndex", priority.to_string()));
        }
        if let Some(sort) = self.sortby {
            pairs.push(("sortby", sort.as_str().to_string()));
        }
        pairs
    }

    /// Snippet cap, with 0 treated as unset.
    pub fn snippet_limit(&self) -> Option<usize> {
        self.max_snippet.filter(|n| *n > 0)
    }
}

/// The search API sends `null` for absent fields as often as it omits them.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub t: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "t", default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Raw snippet; may contain `<strong>` highlight markup.
    #[serde(rename = "txt", default, deserialize_with = "null_as_default")]
    pub snippet: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: Vec<PathItem>,
    #[serde(rename = "searchedIn", default, skip_serializing_if = "Option::is_none")]
    pub searched_in: Option<String>,
}

impl SearchResult {
    /// Non-empty breadcrumb titles, root first.
    pub fn crumbs(&self) -> impl Iterator<Item = &str> {
        self.path
            .iter()
            .map(|p| p.t.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn page_url(&self, base_url: &str) -> Option<String> {
        if self.url.is_empty() {
            None
        } else {
            Some(format!("{}{}", base_url, self.url))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(rename = "TotalCount")]
    pub total_count: Option<u64>,
    #[serde(rename = "TotalPagesCount")]
    pub total_pages_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "c", default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(rename = "Paging", default)]
    pub paging: Option<Paging>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggesters: Vec<String>,
}

impl SearchResponse {
    pub fn total(&self) -> Option<u64> {
        self.paging.as_ref().and_then(|p| p.total_count)
    }

    pub fn pages(&self) -> Option<u64> {
        self.paging.as_ref().and_then(|p| p.total_pages_count)
    }
}

/// Run one search against `/api/v2/search`.
pub async fn search(client: &ApiClient, params: &SearchParams) -> Result<SearchResponse> {
    let url = client.api_url("/v2/search");
    info!("Searching {} for {:?} (page {})", url, params.q, params.page);
    let response: SearchResponse = client
        .get_json(&url, &params.query_pairs())
        .await
        .context("Search request failed")?;
    info!(
        "Search returned {} results (total: {:?})",
        response.results.len(),
        response.total()
    );
    Ok(response)
}
