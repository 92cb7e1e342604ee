// In-memory term snapshot answering repository queries without a database.
// Shared by the remote and bundled backends.

use std::collections::BTreeSet;

use crate::term::Term;

/// Immutable set of terms ordered by canonical term ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSnapshot {
    terms: Vec<Term>,
}

impl TermSnapshot {
    /// Build a snapshot, ordering terms by canonical form.
    /// Terms with the same canonical form keep their enumeration order.
    pub fn new(mut terms: Vec<Term>) -> Self {
        terms.sort_by(|a, b| a.term.cmp(&b.term));
        Self { terms }
    }

    /// Term with this exact canonical name. On duplicates the last one wins.
    pub fn get_by_name(&self, name: &str) -> Option<&Term> {
        self.terms.iter().rev().find(|t| t.term == name)
    }

    /// Case-insensitive substring match on canonical term or description
    pub fn search(&self, query: &str) -> Vec<Term> {
        let query = query.to_lowercase();
        self.terms
            .iter()
            .filter(|t| {
                t.term.to_lowercase().contains(&query)
                    || t.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Terms carrying `tag` in their tag list
    pub fn get_by_tag(&self, tag: &str) -> Vec<Term> {
        self.terms.iter().filter(|t| t.has_tag(tag)).cloned().collect()
    }

    /// Sorted language codes across all translations
    pub fn languages(&self) -> Vec<String> {
        self.terms
            .iter()
            .flat_map(|t| t.translations.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// All terms
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when the snapshot holds no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
