//! Body metadata: word count, reading time, excerpt and inline dates

use lazy_static::lazy_static;
use regex::Regex;

use super::document::InlineDates;

/// Default words-per-minute rate for reading time
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Maximum excerpt length in characters before truncation
const EXCERPT_MAX_CHARS: usize = 160;

lazy_static! {
    static ref FENCED_CODE_RE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref MARKER_RE: Regex = Regex::new(r"[*_`~]+").unwrap();
    static ref PARAGRAPH_RE: Regex = Regex::new(r"\r?\n\s*\r?\n").unwrap();
    static ref EFFECTIVE_DATE_RE: Regex =
        Regex::new(r"\*\*Effective Date:\*\*[ \t]*(.+)").unwrap();
    static ref LAST_UPDATED_RE: Regex = Regex::new(r"\*\*Last Updated:\*\*[ \t]*(.+)").unwrap();
    static ref DATE_LABEL_RE: Regex =
        Regex::new(r"^\*\*(Effective Date|Last Updated):\*\*").unwrap();
}

/// Count of whitespace-delimited tokens in the body
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Estimated reading time in minutes, rounded up
pub fn reading_time(body: &str, words_per_minute: usize) -> usize {
    word_count(body).div_ceil(words_per_minute.max(1))
}

/// Plain-text excerpt from the first prose paragraph
///
/// Headings and bolded date-label lines are skipped; markdown formatting is
/// stripped (links reduced to their text, images to alt text, code fences
/// removed). Text over 160 characters is cut to 160 with `"..."` appended.
pub fn excerpt(body: &str) -> Option<String> {
    let without_code = FENCED_CODE_RE.replace_all(body, "");

    for paragraph in PARAGRAPH_RE.split(&without_code) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() || paragraph.starts_with('#') {
            continue;
        }
        if DATE_LABEL_RE.is_match(paragraph) {
            continue;
        }

        let stripped = strip_markdown(paragraph);
        let stripped = stripped.trim();
        if stripped.is_empty() {
            continue;
        }

        if stripped.chars().count() > EXCERPT_MAX_CHARS {
            let cut: String = stripped.chars().take(EXCERPT_MAX_CHARS).collect();
            return Some(format!("{}...", cut));
        }
        return Some(stripped.to_string());
    }

    None
}

/// Scan the body for bolded `**Effective Date:**` / `**Last Updated:**` labels
///
/// These are a textual convention independent of the front-matter
/// `date`/`lastUpdated` fields and are not reconciled with them.
pub fn extract_inline_dates(body: &str) -> InlineDates {
    let capture_line = |re: &Regex| {
        re.captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };

    InlineDates {
        effective_date: capture_line(&EFFECTIVE_DATE_RE),
        last_updated: capture_line(&LAST_UPDATED_RE),
    }
}

/// Reduce inline markdown to plain text
fn strip_markdown(text: &str) -> String {
    let text = IMAGE_RE.replace_all(text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    MARKER_RE.replace_all(&text, "").to_string()
}
