use std::sync::LazyLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;
use serde::Deserialize;

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p>(.*?)</p>").unwrap());

/// Separator the site appends after every rendered body.
const SEPARATOR: &str = "<hr>";

/// Chapter payload as returned by the chapter API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterResponse {
    #[serde(default)]
    pub txt: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ChapterItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterItem {
    #[serde(default)]
    pub t: Option<String>,
    #[serde(default)]
    pub txt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: Option<String>,
    pub text: Option<String>,
}

/// Renderable chapter body: a flat text blob or a list of titled sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterContent {
    Flat(String),
    Sections(Vec<Section>),
}

impl ChapterResponse {
    /// `items` wins whenever present (even empty); otherwise a non-empty `txt`.
    pub fn into_content(self) -> Option<ChapterContent> {
        if let Some(items) = self.items {
            let sections = items
                .into_iter()
                .map(|item| Section {
                    title: item.t.filter(|t| !t.is_empty()),
                    text: item.txt.filter(|t| !t.is_empty()),
                })
                .collect();
            return Some(ChapterContent::Sections(sections));
        }
        self.txt
            .filter(|t| !t.is_empty())
            .map(ChapterContent::Flat)
    }
}

/// Body options: footnotes, smart punctuation and the GitHub pieces the site
/// renders (tables, strikethrough, task lists). Hard breaks come from `render_body`.
fn body_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
}

/// Render section/chapter body text with the full option set.
pub fn render_body(text: &str) -> String {
    let parser = Parser::new_ext(text, body_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a section title as `<h2>` with a bare pass (no extensions, no hard breaks).
pub fn render_title(title: &str) -> String {
    let source = format!("## {}", title);
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(&source, Options::empty()));
    out
}

/// Assemble the full chapter HTML document in page order.
pub fn render_chapter(content: &ChapterContent) -> String {
    match content {
        ChapterContent::Flat(text) => {
            let mut html = render_body(text);
            html.push_str(SEPARATOR);
            html
        }
        ChapterContent::Sections(sections) => {
            let mut html = String::new();
            for section in sections {
                if let Some(title) = &section.title {
                    html.push_str(&render_title(title));
                }
                if let Some(text) = &section.text {
                    html.push_str(&render_body(text));
                    html.push_str(SEPARATOR);
                }
            }
            html
        }
    }
}

/// Inner HTML of every `<p>…</p>` in document order (non-nested scan).
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    PARAGRAPH_RE
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Paragraph list as the live page numbers it: index + 1 is the `p{n}` anchor.
pub fn chapter_paragraphs(content: &ChapterContent) -> Vec<String> {
    extract_paragraphs(&render_chapter(content))
}
