use serde::Serialize;

use crate::citation::Citation;
use crate::parser::text::{collapse_whitespace, strip_html};
use crate::search::{SearchParams, SearchResult};

/// JSON payload written to stdout.
#[derive(Debug, Serialize)]
pub struct Output<'a> {
    pub query: &'a SearchParams,
    pub total: Option<u64>,
    pub pages: Option<u64>,
    pub results: Vec<SearchResult>,
    pub suggesters: &'a [String],
    pub citations: Vec<Citation>,
}

/// Display copy of a result: optional tag stripping, then char truncation.
pub fn clean_result(result: &SearchResult, strip: bool, max_chars: Option<usize>) -> SearchResult {
    let snippet = if strip {
        strip_html(&result.snippet)
    } else {
        result.snippet.clone()
    };
    let snippet = match max_chars {
        Some(n) => snippet.chars().take(n).collect(),
        None => snippet,
    };
    SearchResult {
        snippet,
        ..result.clone()
    }
}

/// Human-readable block for the stderr summary.
pub fn format_result(result: &SearchResult, base_url: &str, deep_url: Option<&str>) -> String {
    let title = if result.title.is_empty() {
        "(untitled)"
    } else {
        result.title.as_str()
    };
    let crumbs = result.crumbs().collect::<Vec<_>>().join(" > ");
    let snippet = collapse_whitespace(&result.snippet);

    let mut lines = vec![format!("Title: {}", title)];
    if !crumbs.is_empty() {
        lines.push(format!("Path: {}", crumbs));
    }
    if let Some(url) = result.page_url(base_url) {
        lines.push(format!("URL: {}", url));
    }
    if let Some(deep) = deep_url {
        lines.push(format!("Deep URL: {}", deep));
    }
    if !snippet.is_empty() {
        lines.push(format!("Snippet: {}", snippet));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::PathItem;

    fn sample() -> SearchResult {
        SearchResult {
            url: "/cwsa/21/ch".into(),
            title: "The Human Aspiration".into(),
            snippet: "the <strong>divine   life</strong>,\n as".into(),
            path: vec![
                PathItem {
                    t: "Sri Aurobindo".into(),
                    u: Some("/sa".into()),
                },
                PathItem {
                    t: "The Life Divine".into(),
                    u: None,
                },
            ],
            searched_in: None,
        }
    }

    #[test]
    fn clean_strips_then_truncates() {
        let r = clean_result(&sample(), true, Some(12));
        assert_eq!(r.snippet, "the divine l");
        assert_eq!(r.title, "The Human Aspiration");
    }

    #[test]
    fn clean_keeps_markup_by_default() {
        let r = clean_result(&sample(), false, None);
        assert_eq!(r.snippet, sample().snippet);
    }

    #[test]
    fn truncation_counts_chars() {
        let mut r = sample();
        r.snippet = "Ānanda".into();
        assert_eq!(clean_result(&r, false, Some(2)).snippet, "Ān");
    }

    #[test]
    fn summary_block() {
        let text = format_result(&sample(), "https://iw", Some("https://iw/cwsa/21/ch#p1"));
        assert_eq!(
            text,
            "Title: The Human Aspiration\n\
             Path: Sri Aurobindo > The Life Divine\n\
             URL: https://iw/cwsa/21/ch\n\
             Deep URL: https://iw/cwsa/21/ch#p1\n\
             Snippet: the <strong>divine life</strong>, as"
        );
    }

    #[test]
    fn summary_omits_missing_lines() {
        let text = format_result(&SearchResult::default(), "https://iw", None);
        assert_eq!(text, "Title: (untitled)");
    }

    #[test]
    fn output_json_shape() {
        let params = crate::search::tests::params("x");
        let suggesters = vec!["y".to_string()];
        let out = Output {
            query: &params,
            total: None,
            pages: Some(2),
            results: vec![sample()],
            suggesters: &suggesters,
            citations: vec![],
        };
        let json = serde_json::to_value(&out).unwrap();
        assert!(json["total"].is_null());
        assert_eq!(json["pages"], 2);
        assert_eq!(json["results"][0]["t"], "The Human Aspiration");
        assert!(json["results"][0]["txt"].as_str().unwrap().contains("<strong>"));
        assert_eq!(json["query"]["q"], "x");
    }
}
