use serde::Serialize;

use crate::search::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub author: String,
    pub work: String,
    pub section: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_url: Option<String>,
}

/// Breadcrumbs: [0] author, [1] work, the rest joined as section.
pub fn to_citation(result: &SearchResult, base_url: &str, deep_url: Option<String>) -> Citation {
    let crumbs: Vec<&str> = result.crumbs().collect();

    Citation {
        author: crumbs.first().copied().unwrap_or_default().to_string(),
        work: crumbs.get(1).copied().unwrap_or_default().to_string(),
        section: crumbs.iter().skip(2).copied().collect::<Vec<_>>().join(" > "),
        title: result.title.clone(),
        url: result.page_url(base_url).unwrap_or_default(),
        deep_url,
    }
}
