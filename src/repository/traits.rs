//! Read contract shared by every term repository backend.
//!
//! The normalizer only needs [`TermRepository::list_all`]; the other
//! operations back the lookup side of the glossary.

use async_trait::async_trait;

use super::RepositoryError;
use crate::term::Term;

/// Backend trait for glossary term access.
///
/// Implementations are read-only and shareable across tasks. All listing
/// operations return terms ordered by canonical term ascending.
#[async_trait]
pub trait TermRepository: Send + Sync {
    /// Get a term by its exact canonical name.
    async fn get_by_name(&self, name: &str) -> Result<Option<Term>, RepositoryError>;

    /// Terms whose canonical form or description contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<Term>, RepositoryError>;

    /// Terms carrying `tag` in their comma-separated tag list.
    async fn get_by_tag(&self, tag: &str) -> Result<Vec<Term>, RepositoryError>;

    /// Every term in the glossary.
    async fn list_all(&self) -> Result<Vec<Term>, RepositoryError>;

    /// Total number of terms.
    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Sorted set of language codes that have at least one translation.
    async fn languages(&self) -> Result<Vec<String>, RepositoryError>;

    /// Translation of the term called `name` into `language_code`.
    async fn translate(
        &self,
        name: &str,
        language_code: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .get_by_name(name)
            .await?
            .and_then(|term| term.translate(language_code).map(str::to_string)))
    }

    /// Reload from the backing store. Backends without a cache do nothing.
    async fn refresh(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
