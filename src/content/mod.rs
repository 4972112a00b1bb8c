//! Content module - documents, front-matter, rendering and metadata

mod document;
mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod metadata;

pub use document::{
    Document, DocumentDescriptor, InlineDates, ProcessedDocument, RawDocument, TocEntry,
};
pub use frontmatter::FrontMatter;
pub use loader::DocumentLoader;
pub use markdown::{MarkdownRenderer, RenderOptions, Rendered};
