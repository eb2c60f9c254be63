//! Plain-text summaries derived from markdown bodies.
//!
//! Used to fill the description of a user-created document when the author
//! leaves it blank.

use once_cell::sync::Lazy;
use regex::Regex;

const SUMMARY_MAX_CHARS: usize = 140;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\([^)]*\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\|\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-+]|\d+\.)\s+").expect("valid list marker regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns a single-line plain-text summary of `content`.
///
/// Images are dropped, links keep their label, markdown punctuation and list
/// markers are stripped, whitespace collapses, and the result is capped at
/// 140 chars with a trailing ellipsis when cut. Empty input yields `""`.
pub fn summarize_markdown(content: &str) -> String {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_markers = LIST_MARKER_RE.replace_all(&without_links, " ");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_markers, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();

    if trimmed.chars().count() <= SUMMARY_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut summary: String = trimmed.chars().take(SUMMARY_MAX_CHARS).collect();
    summary.truncate(summary.trim_end().len());
    summary.push_str("...");
    summary
}
