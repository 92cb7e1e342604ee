// Glossary term - the immutable value every repository backend produces
// and the normalizer consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A glossary term with all its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Unique identifier for the term
    pub id: i64,
    /// Canonical surface form (e.g., "State of Charge")
    pub term: String,
    /// Human-readable description of the term
    #[serde(default)]
    pub description: String,
    /// Whether matching this term's variations respects letter case
    #[serde(default, alias = "case_sensitive")]
    pub case_sensitive: bool,
    /// Whether the term may be translated at all
    #[serde(default = "default_translatable")]
    pub translatable: bool,
    /// Whether the term is on the do-not-use list
    #[serde(default)]
    pub forbidden: bool,
    /// Comma-separated tag labels
    #[serde(default)]
    pub tags: Option<String>,
    /// Plural of the canonical form
    #[serde(default, alias = "plural_form")]
    pub plural_form: Option<String>,
    /// Language code -> translated term
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    /// Alternate spellings that normalize to `term`
    #[serde(default, alias = "alternative_words")]
    pub alternative_words: Vec<String>,
    /// Language code -> localized description
    #[serde(default, alias = "additional_descriptions")]
    pub additional_descriptions: BTreeMap<String, String>,
}

fn default_translatable() -> bool {
    true
}

impl Term {
    /// Create a term with the given id and canonical form and no metadata
    pub fn new(id: i64, term: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            description: String::new(),
            case_sensitive: false,
            translatable: true,
            forbidden: false,
            tags: None,
            plural_form: None,
            translations: BTreeMap::new(),
            alternative_words: Vec::new(),
            additional_descriptions: BTreeMap::new(),
        }
    }

    /// Get the translation for a language code (e.g., "da", "de")
    pub fn translate(&self, language_code: &str) -> Option<&str> {
        self.translations.get(language_code).map(String::as_str)
    }

    /// Get the description, preferring a localized one when available
    pub fn description_for(&self, language_code: Option<&str>) -> &str {
        language_code
            .and_then(|code| self.additional_descriptions.get(code))
            .map(String::as_str)
            .unwrap_or(&self.description)
    }

    /// List of tags, trimmed, with empty labels dropped
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check membership of `tag` in the comma-split tag list
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags().into_iter().any(|t| t == tag)
    }

    /// Canonical form followed by the alternatives, skipping empty strings
    pub fn variations(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.term.as_str())
            .chain(self.alternative_words.iter().map(String::as_str))
            .filter(|variation| !variation.is_empty())
    }
}

#[cfg(test)]
#[path = "term_test.rs"]
mod tests;
