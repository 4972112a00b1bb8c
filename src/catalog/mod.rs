//! Document catalog - listing and searching without full rendering
//!
//! The catalog parses only front-matter per file and holds no state across
//! calls; every invocation re-scans the content directory.

use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::PipelineConfig;
use crate::content::loader::is_document_file;
use crate::content::{DocumentDescriptor, FrontMatter};
use crate::error::{ContentError, Result};

/// Enumerates and searches documents of a content type/language
pub struct DocumentCatalog<'a> {
    content_root: &'a Path,
    config: &'a PipelineConfig,
}

impl<'a> DocumentCatalog<'a> {
    pub fn new(content_root: &'a Path, config: &'a PipelineConfig) -> Self {
        Self {
            content_root,
            config,
        }
    }

    /// List documents for a content type and language
    ///
    /// Drafts are excluded; files with malformed front-matter are skipped with
    /// a warning rather than aborting the listing. Ordering: date descending,
    /// then undated documents by title ascending.
    pub fn list(&self, content_type: &str, language: &str) -> Result<Vec<DocumentDescriptor>> {
        if !self.config.has_content_type(content_type) {
            return Err(ContentError::InvalidDocumentType(content_type.to_string()));
        }

        let dir = self.content_root.join(content_type).join(language);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<(Option<DateTime<Local>>, DocumentDescriptor)> = Vec::new();

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_document_file(path, &self.config.extensions) {
                continue;
            }

            let raw = match fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("failed to read {:?}: {}", path, e);
                    continue;
                }
            };

            let (fm, _body) = match FrontMatter::parse(&raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("skipping {:?}: {}", path, e);
                    continue;
                }
            };

            if fm.draft {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string();

            let sort_date = fm.parse_date();
            entries.push((
                sort_date,
                DocumentDescriptor {
                    slug: fm.slug.unwrap_or_else(|| slug::slugify(&stem)),
                    title: fm.title.unwrap_or_else(|| stem.clone()),
                    description: fm.description,
                    date: fm.date,
                    last_updated: fm.last_updated,
                    tags: fm.tags,
                    draft: fm.draft,
                    path: path.to_path_buf(),
                },
            ));
        }

        entries.sort_by(|(date_a, a), (date_b, b)| match (date_a, date_b) {
            (Some(x), Some(y)) => y.cmp(x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.title.cmp(&b.title),
        });

        Ok(entries.into_iter().map(|(_, d)| d).collect())
    }

    /// Case-insensitive substring search over title, description and tags
    ///
    /// Preserves the ordering produced by `list`.
    pub fn search(
        &self,
        query: &str,
        content_type: &str,
        language: &str,
    ) -> Result<Vec<DocumentDescriptor>> {
        let needle = query.to_lowercase();
        let matches = self
            .list(content_type, language)?
            .into_iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&needle)
                    || d.description
                        .as_ref()
                        .is_some_and(|desc| desc.to_lowercase().contains(&needle))
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(matches)
    }
}
