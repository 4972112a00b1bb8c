//! Pipeline configuration (content.yml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ContentError, Result};

/// Configuration for the content pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language tried when the requested language has no document
    pub fallback_language: String,

    /// Content types the pipeline will serve (subdirectories of the content root)
    pub content_types: Vec<String>,

    /// Words-per-minute rate used for reading time
    pub words_per_minute: usize,

    /// File extensions recognized as documents
    pub extensions: Vec<String>,

    /// Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fallback_language: "en".to_string(),
            content_types: vec!["legal".to_string(), "case-studies".to_string()],
            words_per_minute: 200,
            extensions: vec!["md".to_string(), "markdown".to_string()],
            extra: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = serde_yaml::from_str(&content).map_err(|e| {
            ContentError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(config)
    }

    /// Check whether a content type is configured
    pub fn has_content_type(&self, content_type: &str) -> bool {
        self.content_types.iter().any(|t| t == content_type)
    }
}
