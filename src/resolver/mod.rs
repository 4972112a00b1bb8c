//! Language fallback resolution
//!
//! A document missing in the requested language is retried exactly once in the
//! configured fallback language. There is no multi-hop chain.

use crate::error::Result;

/// Single-hop language fallback policy
#[derive(Debug, Clone)]
pub struct LanguageResolver {
    fallback_language: String,
}

impl LanguageResolver {
    pub fn new(fallback_language: impl Into<String>) -> Self {
        Self {
            fallback_language: fallback_language.into(),
        }
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Run `load` for the requested language, retrying once with the fallback
    /// language on a not-found result
    ///
    /// Errors other than not-found never trigger the fallback; the second
    /// not-found propagates to the caller.
    pub fn resolve<T, F>(&self, requested: &str, mut load: F) -> Result<T>
    where
        F: FnMut(&str) -> Result<T>,
    {
        match load(requested) {
            Err(e) if e.is_not_found() && requested != self.fallback_language => {
                tracing::debug!(
                    "no document for language '{}', retrying with fallback '{}'",
                    requested,
                    self.fallback_language
                );
                load(&self.fallback_language)
            }
            other => other,
        }
    }
}
