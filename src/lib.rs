//! longform: a document content pipeline
//!
//! Turns versioned, frontmatter-annotated text files into render-ready
//! artifacts (HTML, table of contents, excerpt, reading time, extracted
//! dates), with process-wide caching and single-hop language fallback.
//! Used for legal documents, case studies and similar long-form content.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod resolver;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use cache::ContentCache;
pub use catalog::DocumentCatalog;
pub use config::PipelineConfig;
pub use content::{
    Document, DocumentDescriptor, DocumentLoader, FrontMatter, InlineDates, MarkdownRenderer,
    ProcessedDocument, RawDocument, RenderOptions, TocEntry,
};
pub use error::{ContentError, Result};
pub use resolver::LanguageResolver;

/// The content pipeline
///
/// Owns the configuration, the processed-document cache and the language
/// fallback policy. Documents live under
/// `content_root / content_type / language / slug.<ext>`.
pub struct Pipeline {
    /// Pipeline configuration
    pub config: PipelineConfig,
    /// Root of the content directory tree
    pub content_root: PathBuf,
    cache: ContentCache,
    resolver: LanguageResolver,
    renderer: MarkdownRenderer,
}

/// Non-throwing load result for consumers that render a fallback UI
///
/// `success` is false exactly when `error` is set; callers never need their
/// own error handling at this boundary.
#[derive(Debug, Clone)]
pub struct SafeLoad {
    pub success: bool,
    pub document: Option<Arc<ProcessedDocument>>,
    pub error: Option<String>,
}

impl Pipeline {
    /// Create a pipeline rooted at a content directory
    ///
    /// Reads `content.yml` from the root when present, otherwise uses
    /// defaults.
    pub fn new<P: AsRef<Path>>(content_root: P) -> Result<Self> {
        let content_root = content_root.as_ref().to_path_buf();
        let config_path = content_root.join("content.yml");

        let config = if config_path.exists() {
            PipelineConfig::load(&config_path)?
        } else {
            PipelineConfig::default()
        };

        Ok(Self::with_config(content_root, config))
    }

    /// Create a pipeline with an explicit configuration
    pub fn with_config(content_root: PathBuf, config: PipelineConfig) -> Self {
        let resolver = LanguageResolver::new(config.fallback_language.clone());
        Self {
            config,
            content_root,
            cache: ContentCache::new(),
            resolver,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Resolve a (content type, language, slug) triple to a file path
    pub fn document_path(
        &self,
        content_type: &str,
        language: &str,
        slug: &str,
    ) -> Result<PathBuf> {
        if !self.config.has_content_type(content_type) {
            return Err(ContentError::InvalidDocumentType(content_type.to_string()));
        }

        let dir = self.content_root.join(content_type).join(language);
        for ext in &self.config.extensions {
            let candidate = dir.join(format!("{}.{}", slug, ext));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        Err(ContentError::NotFound(format!(
            "{}/{}/{}",
            content_type, language, slug
        )))
    }

    /// Load and process a document, memoized per (path, options)
    pub fn load(
        &self,
        content_type: &str,
        language: &str,
        slug: &str,
        options: &RenderOptions,
    ) -> Result<Arc<ProcessedDocument>> {
        let path = self.document_path(content_type, language, slug)?;
        self.load_path(&path, options)
    }

    /// Load and process a document by explicit path
    ///
    /// Drafts are loadable here; only catalog listings exclude them.
    pub fn load_path(&self, path: &Path, options: &RenderOptions) -> Result<Arc<ProcessedDocument>> {
        let key = ContentCache::fingerprint(path, options);
        if let Some(document) = self.cache.get(key) {
            tracing::debug!("cache hit for {}", path.display());
            return Ok(document);
        }

        tracing::debug!("cache miss for {}", path.display());
        let document = DocumentLoader::load(path)?;
        let processed = self.process(document, options)?;
        Ok(self.cache.put(key, processed))
    }

    /// Load with single-hop language fallback
    pub fn resolve(
        &self,
        content_type: &str,
        language: &str,
        slug: &str,
        options: &RenderOptions,
    ) -> Result<Arc<ProcessedDocument>> {
        self.resolver
            .resolve(language, |lang| self.load(content_type, lang, slug, options))
    }

    /// Load with fallback, converting any error into a plain result
    pub fn load_safe(
        &self,
        content_type: &str,
        language: &str,
        slug: &str,
        options: &RenderOptions,
    ) -> SafeLoad {
        match self.resolve(content_type, language, slug, options) {
            Ok(document) => SafeLoad {
                success: true,
                document: Some(document),
                error: None,
            },
            Err(e) => SafeLoad {
                success: false,
                document: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Catalog over this pipeline's content root
    pub fn catalog(&self) -> DocumentCatalog<'_> {
        DocumentCatalog::new(&self.content_root, &self.config)
    }

    /// Access the document cache
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Drop all cached documents (cache-busting after content updates)
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Run the pure transform stages over an already-loaded document
    fn process(&self, document: Document, options: &RenderOptions) -> Result<ProcessedDocument> {
        let rendered = self.renderer.render(&document.body, options)?;
        let word_count = content::metadata::word_count(&document.body);
        let reading_time =
            content::metadata::reading_time(&document.body, self.config.words_per_minute);
        let excerpt = content::metadata::excerpt(&document.body);

        Ok(ProcessedDocument {
            body: document.body,
            html: rendered.html,
            metadata: document.metadata,
            excerpt,
            word_count,
            reading_time,
            table_of_contents: rendered.toc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_doc(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn privacy_policy() -> &'static str {
        "---\ntitle: Privacy Policy\ndate: 2024-01-01\n---\n**Effective Date:** January 1, 2024\n\nWe care about privacy and keep collection to the minimum needed to serve you.\n"
    }

    #[test]
    fn test_end_to_end_privacy_policy() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "legal/en/privacy-policy.md", privacy_policy());

        let pipeline = Pipeline::new(dir.path()).unwrap();
        let doc = pipeline
            .load("legal", "en", "privacy-policy", &RenderOptions::default())
            .unwrap();

        assert_eq!(doc.metadata.title, Some("Privacy Policy".to_string()));
        assert_eq!(doc.metadata.date, Some("2024-01-01".to_string()));
        assert!(doc.html.contains("<strong>Effective Date:</strong>"));
        assert!(doc
            .excerpt
            .as_deref()
            .unwrap()
            .starts_with("We care about privacy"));
        assert!(doc.word_count > 0);
        assert_eq!(doc.reading_time, 1);

        let dates = content::metadata::extract_inline_dates(&doc.body);
        assert_eq!(dates.effective_date.as_deref(), Some("January 1, 2024"));
    }

    #[test]
    fn test_cache_single_read() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "legal/en/privacy-policy.md", privacy_policy());

        let pipeline = Pipeline::new(dir.path()).unwrap();
        let options = RenderOptions::default();
        let path = dir.path().join("legal/en/privacy-policy.md");

        let first = pipeline.load_path(&path, &options).unwrap();

        // Remove the backing file; a second load must come from the cache
        fs::remove_file(&path).unwrap();
        let second = pipeline.load_path(&path, &options).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // Clearing the cache forces a re-read, which now fails
        pipeline.clear_cache();
        assert!(pipeline.load_path(&path, &options).unwrap_err().is_not_found());
    }

    #[test]
    fn test_cache_keyed_by_options() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "legal/en/terms.md",
            "---\ntitle: Terms\n---\n# Scope\n\nText.\n",
        );

        let pipeline = Pipeline::new(dir.path()).unwrap();
        let plain = pipeline
            .load("legal", "en", "terms", &RenderOptions::default())
            .unwrap();
        let with_toc = pipeline
            .load(
                "legal",
                "en",
                "terms",
                &RenderOptions {
                    toc: true,
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(plain.table_of_contents.is_none());
        assert!(with_toc.table_of_contents.is_some());
        assert_eq!(pipeline.cache().len(), 2);
    }

    #[test]
    fn test_language_fallback() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "legal/en/privacy-policy.md", privacy_policy());

        let pipeline = Pipeline::new(dir.path()).unwrap();
        let doc = pipeline
            .resolve("legal", "fr", "privacy-policy", &RenderOptions::default())
            .unwrap();
        assert_eq!(doc.metadata.title, Some("Privacy Policy".to_string()));

        let err = pipeline
            .resolve("legal", "fr", "imprint", &RenderOptions::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_safe_never_errors() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "legal/en/privacy-policy.md", privacy_policy());

        let pipeline = Pipeline::new(dir.path()).unwrap();
        let ok = pipeline.load_safe("legal", "en", "privacy-policy", &RenderOptions::default());
        assert!(ok.success);
        assert!(ok.document.is_some());
        assert!(ok.error.is_none());

        let missing = pipeline.load_safe("legal", "de", "imprint", &RenderOptions::default());
        assert!(!missing.success);
        assert!(missing.document.is_none());
        assert!(missing.error.is_some());

        let bad_type = pipeline.load_safe("blog", "en", "post", &RenderOptions::default());
        assert!(!bad_type.success);
        assert!(bad_type.error.unwrap().contains("invalid document type"));
    }

    #[test]
    fn test_draft_loadable_but_unlisted() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "legal/en/upcoming-policy.md",
            "---\ntitle: Upcoming Policy\ndraft: true\n---\nStill being reviewed.\n",
        );

        let pipeline = Pipeline::new(dir.path()).unwrap();
        assert!(pipeline.catalog().list("legal", "en").unwrap().is_empty());

        let doc = pipeline
            .load("legal", "en", "upcoming-policy", &RenderOptions::default())
            .unwrap();
        assert!(doc.metadata.draft);
        assert!(doc.html.contains("Still being reviewed."));
    }

    #[test]
    fn test_determinism_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "legal/en/privacy-policy.md", privacy_policy());

        let options = RenderOptions {
            toc: true,
            ..Default::default()
        };
        let a = Pipeline::new(dir.path())
            .unwrap()
            .load("legal", "en", "privacy-policy", &options)
            .unwrap();
        let b = Pipeline::new(dir.path())
            .unwrap()
            .load("legal", "en", "privacy-policy", &options)
            .unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_invalid_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(dir.path()).unwrap();
        let err = pipeline
            .load("blog", "en", "post", &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidDocumentType(_)));
    }

    #[test]
    fn test_config_file_at_content_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("content.yml"),
            "fallback_language: de\ncontent_types:\n  - legal\n  - guides\n",
        )
        .unwrap();
        write_doc(
            dir.path(),
            "guides/de/onboarding.md",
            "---\ntitle: Einstieg\n---\nWillkommen.\n",
        );

        let pipeline = Pipeline::new(dir.path()).unwrap();
        assert_eq!(pipeline.config.fallback_language, "de");

        // "fr" is missing, falls back to the configured "de"
        let doc = pipeline
            .resolve("guides", "fr", "onboarding", &RenderOptions::default())
            .unwrap();
        assert_eq!(doc.metadata.title, Some("Einstieg".to_string()));
    }
}
