//! The glossary facade.
//!
//! Owns one [`TermRepository`] picked at construction time and adds text
//! normalization on top of the repository queries.

use std::sync::Arc;

use crate::config::{ConfigError, GlossaryConfig, SourceKind};
use crate::normalizer::{InvalidTermError, Normalizer};
use crate::repository::{
    BundledRepository, RemoteRepository, RepositoryError, SqliteRepository, TermRepository,
};
use crate::term::Term;

/// Error types for glossary operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlossaryError {
    /// The term repository failed; no normalization was attempted
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// A term in the snapshot cannot be used for normalization
    #[error(transparent)]
    InvalidTerm(#[from] InvalidTermError),
    /// Settings are incomplete or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Main interface for accessing the glossary
#[derive(Clone)]
pub struct Glossary {
    repository: Arc<dyn TermRepository>,
}

impl Glossary {
    /// Wrap an existing repository
    pub fn new(repository: Arc<dyn TermRepository>) -> Self {
        Self { repository }
    }

    /// Build the repository named by `config`
    pub async fn from_config(config: &GlossaryConfig) -> Result<Self, GlossaryError> {
        let repository: Arc<dyn TermRepository> = match config.source {
            SourceKind::Sqlite => {
                let path = config.resolved_db_path()?;
                Arc::new(SqliteRepository::open(&path).await?)
            }
            SourceKind::Remote => Arc::new(RemoteRepository::new(
                config.api_url.clone(),
                config.request_timeout(),
            )?),
            SourceKind::Bundled => {
                let path = config.resolved_bundle_path()?;
                Arc::new(BundledRepository::from_path(&path)?)
            }
        };

        crate::info!("Glossary using {} source", config.source);
        Ok(Self::new(repository))
    }

    /// The underlying repository
    pub fn repository(&self) -> &Arc<dyn TermRepository> {
        &self.repository
    }

    /// Get a term by its name
    pub async fn get_term(&self, name: &str) -> Result<Option<Term>, GlossaryError> {
        Ok(self.repository.get_by_name(name).await?)
    }

    /// Search for terms matching a query
    pub async fn search(&self, query: &str) -> Result<Vec<Term>, GlossaryError> {
        Ok(self.repository.search(query).await?)
    }

    /// Get all terms with a specific tag
    pub async fn get_by_tag(&self, tag: &str) -> Result<Vec<Term>, GlossaryError> {
        Ok(self.repository.get_by_tag(tag).await?)
    }

    /// Get all terms in the glossary
    pub async fn get_all(&self) -> Result<Vec<Term>, GlossaryError> {
        Ok(self.repository.list_all().await?)
    }

    /// Get the translation of a term into a language
    pub async fn translate(
        &self,
        name: &str,
        language_code: &str,
    ) -> Result<Option<String>, GlossaryError> {
        Ok(self.repository.translate(name, language_code).await?)
    }

    /// Get total number of terms
    pub async fn count(&self) -> Result<usize, GlossaryError> {
        Ok(self.repository.count().await?)
    }

    /// Get all language codes with translations
    pub async fn languages(&self) -> Result<Vec<String>, GlossaryError> {
        Ok(self.repository.languages().await?)
    }

    /// Reload glossary data from the backing store
    pub async fn refresh(&self) -> Result<(), GlossaryError> {
        Ok(self.repository.refresh().await?)
    }

    /// Build a reusable normalizer from the current term snapshot
    pub async fn normalizer(&self) -> Result<Normalizer, GlossaryError> {
        let terms = self.repository.list_all().await?;
        Ok(Normalizer::new(&terms)?)
    }

    /// Replace alternative spellings in `text` with their canonical terms
    pub async fn normalize_text(&self, text: &str) -> Result<String, GlossaryError> {
        let normalizer = self.normalizer().await?;
        Ok(normalizer.normalize(text))
    }
}

#[cfg(test)]
#[path = "glossary_test.rs"]
mod tests;
