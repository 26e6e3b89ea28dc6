use super::text::normalize;

/// Excerpt starts this far into the normalized snippet.
const EXCERPT_OFFSET: f64 = 0.1;
/// Maximum excerpt length, in chars.
const EXCERPT_WINDOW: usize = 80;
/// Shorter excerpts are too unreliable to match on.
const EXCERPT_MIN: usize = 10;

/// Which pass produced a match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphMatch {
    /// 1-indexed paragraph ids, ascending.
    pub ids: Vec<usize>,
    pub pass: Option<MatchPass>,
}

impl ParagraphMatch {
    fn none() -> Self {
        Self {
            ids: Vec::new(),
            pass: None,
        }
    }
}

/// Every paragraph (1-indexed) whose normalized text contains the snippet,
/// with the pass that found them.
///
/// Primary pass tests the whole normalized snippet. Only when it finds nothing
/// does the fallback run, using an interior slice of the snippet: edges are the
/// likeliest place for tag-stripping artifacts to break containment.
pub fn match_paragraphs(paragraphs: &[String], snippet: &str) -> ParagraphMatch {
    let norm = normalize(snippet);
    if norm.is_empty() {
        return ParagraphMatch::none();
    }

    let normalized: Vec<String> = paragraphs.iter().map(|p| normalize(p)).collect();

    let ids = containing(&normalized, &norm);
    if !ids.is_empty() {
        return ParagraphMatch {
            ids,
            pass: Some(MatchPass::Primary),
        };
    }

    let Some(excerpt) = excerpt(&norm) else {
        return ParagraphMatch::none();
    };
    let ids = containing(&normalized, excerpt);
    if ids.is_empty() {
        return ParagraphMatch::none();
    }
    ParagraphMatch {
        ids,
        pass: Some(MatchPass::Fallback),
    }
}

/// Interior slice: from 10% of the length, at most 80 chars, trimmed.
/// `None` when the result is under 10 chars.
fn excerpt(norm: &str) -> Option<&str> {
    let len = norm.chars().count();
    let start = (len as f64 * EXCERPT_OFFSET).floor() as usize;
    let end = (start + EXCERPT_WINDOW).min(len);

    let byte_at = |n: usize| {
        norm.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(norm.len())
    };
    let excerpt = norm[byte_at(start)..byte_at(end)].trim();

    if excerpt.chars().count() < EXCERPT_MIN {
        None
    } else {
        Some(excerpt)
    }
}

fn containing(normalized: &[String], needle: &str) -> Vec<usize> {
    normalized
        .iter()
        .enumerate()
        .filter(|(_, p)| p.contains(needle))
        .map(|(i, _)| i + 1)
        .collect()
}
