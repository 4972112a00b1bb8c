//! Document models

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;

/// A raw file as read from disk, before any parsing
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Source file path
    pub path: PathBuf,

    /// Full file content, untouched
    pub raw_text: String,
}

/// A loaded document: parsed front-matter plus the markdown body
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file path
    pub path: PathBuf,

    /// Parsed front-matter
    pub metadata: FrontMatter,

    /// Markdown body (everything after the front-matter block)
    pub body: String,
}

/// One entry in a document's heading outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1 for h1, 2 for h2, ...)
    pub level: u32,

    /// Heading text with inline formatting flattened
    pub text: String,

    /// Anchor id the heading was given in the rendered HTML
    pub anchor: String,
}

/// A fully processed document, ready for the page-rendering layer
///
/// Pure function of (body, options): identical inputs always produce an
/// identical value, which is what makes caching safe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedDocument {
    /// Markdown body
    pub body: String,

    /// Rendered HTML
    pub html: String,

    /// Parsed front-matter
    pub metadata: FrontMatter,

    /// Short plain-text excerpt of the first paragraph
    pub excerpt: Option<String>,

    /// Whitespace-delimited token count of the body
    pub word_count: usize,

    /// Estimated reading time in minutes
    pub reading_time: usize,

    /// Heading outline, present when TOC rendering was requested
    pub table_of_contents: Option<Vec<TocEntry>>,
}

/// Catalog-facing summary of a document, built from front-matter alone
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDescriptor {
    /// URL-safe identifier (front-matter slug or the file stem)
    pub slug: String,

    /// Document title (front-matter title or the file stem)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Raw front-matter date string
    pub date: Option<String>,

    /// Raw front-matter lastUpdated string
    pub last_updated: Option<String>,

    /// Tags
    pub tags: Vec<String>,

    /// Whether the document is flagged as a draft
    pub draft: bool,

    /// Source file path
    pub path: PathBuf,
}

/// Inline dates extracted from bolded labels in the body text
///
/// These are a textual convention independent of the front-matter
/// `date`/`lastUpdated` fields; the two are not reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineDates {
    /// Text following a `**Effective Date:**` label, if present
    pub effective_date: Option<String>,

    /// Text following a `**Last Updated:**` label, if present
    pub last_updated: Option<String>,
}

impl InlineDates {
    /// Whether neither label was found
    pub fn is_empty(&self) -> bool {
        self.effective_date.is_none() && self.last_updated.is_none()
    }
}
