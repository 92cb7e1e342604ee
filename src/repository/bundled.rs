// Bundled repository - serves terms from a static JSON file shipped with the
// application. The file is read once; queries run against the in-memory snapshot.

use async_trait::async_trait;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{ApiResponse, RepositoryError, TermRepository, TermSnapshot};
use crate::term::Term;

/// Accepted bundle layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum BundleDocument {
    /// Same shape as the glossary endpoint: `{ "terms": [...] }`
    Api(ApiResponse),
    /// A bare array of terms
    Terms(Vec<Term>),
}

/// Repository backed by a static bundle
#[derive(Debug, Clone, Default)]
pub struct BundledRepository {
    snapshot: TermSnapshot,
}

impl BundledRepository {
    /// Create a repository from already loaded terms
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self {
            snapshot: TermSnapshot::new(terms),
        }
    }

    /// Parse a bundle held in memory
    pub fn from_json(content: &str) -> Result<Self, RepositoryError> {
        let document: BundleDocument =
            serde_json::from_str(content).map_err(|e| RepositoryError::Decode(e.to_string()))?;

        let terms = match document {
            BundleDocument::Api(response) => response.into_terms(),
            BundleDocument::Terms(terms) => terms,
        };

        Ok(Self::from_terms(terms))
    }

    /// Load a bundle from disk
    pub fn from_path(path: &Path) -> Result<Self, RepositoryError> {
        crate::debug!("Loading glossary bundle from {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| RepositoryError::Io(format!("{}: {}", path.display(), e)))?;
        let repository = Self::from_json(&content)?;

        crate::info!("Loaded {} terms from bundle", repository.snapshot.len());
        Ok(repository)
    }

    /// The loaded snapshot
    pub fn snapshot(&self) -> &TermSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl TermRepository for BundledRepository {
    async fn get_by_name(&self, name: &str) -> Result<Option<Term>, RepositoryError> {
        Ok(self.snapshot.get_by_name(name).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.snapshot.search(query))
    }

    async fn get_by_tag(&self, tag: &str) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.snapshot.get_by_tag(tag))
    }

    async fn list_all(&self) -> Result<Vec<Term>, RepositoryError> {
        Ok(self.snapshot.terms().to_vec())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.snapshot.len())
    }

    async fn languages(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.snapshot.languages())
    }
}

#[cfg(test)]
#[path = "bundled_test.rs"]
mod tests;
