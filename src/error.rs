//! Error taxonomy for the content pipeline

use thiserror::Error;

/// Errors produced while loading, parsing or rendering documents
#[derive(Debug, Error)]
pub enum ContentError {
    /// The path or slug did not resolve to a readable document
    #[error("document not found: {0}")]
    NotFound(String),

    /// A front-matter block opened but never closed, or its YAML failed to parse
    #[error("malformed front-matter: {0}")]
    MalformedFrontmatter(String),

    /// A rendering stage failed
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// The requested content type is not configured
    #[error("invalid document type: {0}")]
    InvalidDocumentType(String),

    /// The pipeline configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Underlying filesystem error other than a missing file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether this error means the document simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
