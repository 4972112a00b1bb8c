//! Document loader - reads files and splits front-matter from body
//!
//! The only blocking I/O in the pipeline lives here; everything downstream
//! (front-matter split, rendering, metadata extraction) is pure.

use std::fs;
use std::io;
use std::path::Path;

use super::document::{Document, RawDocument};
use super::FrontMatter;
use crate::error::{ContentError, Result};

/// Loads documents from disk
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read a file verbatim
    pub fn load_raw(path: &Path) -> Result<RawDocument> {
        match fs::read_to_string(path) {
            Ok(raw_text) => Ok(RawDocument {
                path: path.to_path_buf(),
                raw_text,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ContentError::NotFound(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Split a raw document into front-matter and body
    pub fn split_frontmatter(raw: &RawDocument) -> Result<(FrontMatter, &str)> {
        FrontMatter::parse(&raw.raw_text)
            .map_err(|e| annotate_path(e, &raw.path))
    }

    /// Read and split in one step
    pub fn load(path: &Path) -> Result<Document> {
        let raw = Self::load_raw(path)?;
        let (metadata, body) = Self::split_frontmatter(&raw)?;
        let body = body.to_string();
        Ok(Document {
            path: raw.path,
            metadata,
            body,
        })
    }
}

fn annotate_path(err: ContentError, path: &Path) -> ContentError {
    match err {
        ContentError::MalformedFrontmatter(reason) => {
            ContentError::MalformedFrontmatter(format!("{}: {}", path.display(), reason))
        }
        other => other,
    }
}

/// Check if a file has one of the recognized document extensions
pub fn is_document_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|ext| ext == e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_raw_missing_file() {
        let err = DocumentLoader::load_raw(Path::new("/no/such/file.md")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.md");
        std::fs::write(&path, "---\ntitle: Terms of Service\n---\nThe terms.\n").unwrap();

        let doc = DocumentLoader::load(&path).unwrap();
        assert_eq!(doc.metadata.title, Some("Terms of Service".to_string()));
        assert_eq!(doc.body, "The terms.\n");
        assert_eq!(doc.path, path);
    }

    #[test]
    fn test_load_without_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.md");
        let raw = "No front-matter, just text.\n";
        std::fs::write(&path, raw).unwrap();

        let doc = DocumentLoader::load(&path).unwrap();
        assert_eq!(doc.metadata, FrontMatter::default());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_malformed_frontmatter_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.md");
        std::fs::write(&path, "---\ntitle: never closed\n").unwrap();

        let err = DocumentLoader::load(&path).unwrap_err();
        match err {
            ContentError::MalformedFrontmatter(msg) => assert!(msg.contains("broken.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_document_file() {
        let exts = vec!["md".to_string(), "markdown".to_string()];
        assert!(is_document_file(Path::new("a/b/c.md"), &exts));
        assert!(is_document_file(Path::new("c.markdown"), &exts));
        assert!(!is_document_file(Path::new("c.txt"), &exts));
        assert!(!is_document_file(Path::new("noext"), &exts));
    }
}
