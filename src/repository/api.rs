// Wire types of the public glossary endpoint and their conversion into Terms

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::term::Term;

/// Response body of the glossary endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    pub terms: Vec<ApiTerm>,
}

/// A translation entry as served by the endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiTranslation {
    pub language_code: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// An alternative spelling as served by the endpoint.
///
/// Plural alternatives are plain alternatives here: like every other
/// variation they normalize to the canonical term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlternative {
    pub alternative: String,
}

/// A term as served by the endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiTerm {
    pub id: i64,
    pub term: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default = "default_translatable")]
    pub translatable: bool,
    #[serde(default)]
    pub forbidden: bool,
    /// Comma-separated; an empty string means no tags
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub plural_form: Option<String>,
    #[serde(default)]
    pub translations: Vec<ApiTranslation>,
    #[serde(default)]
    pub alternatives: Vec<ApiAlternative>,
    /// Loosely typed upstream; entries without a language code and
    /// description are ignored
    #[serde(default)]
    pub additional_descriptions: Vec<Value>,
}

fn default_translatable() -> bool {
    true
}

impl From<ApiTerm> for Term {
    fn from(api: ApiTerm) -> Self {
        let translations = api
            .translations
            .into_iter()
            .filter_map(|t| t.translation.map(|text| (t.language_code, text)))
            .collect();

        let additional_descriptions = api
            .additional_descriptions
            .iter()
            .filter_map(|entry| {
                let code = entry.get("languageCode")?.as_str()?;
                let description = entry.get("description")?.as_str()?;
                Some((code.to_string(), description.to_string()))
            })
            .collect();

        Term {
            id: api.id,
            term: api.term,
            description: api.description.unwrap_or_default(),
            case_sensitive: api.case_sensitive,
            translatable: api.translatable,
            forbidden: api.forbidden,
            tags: api.tags.filter(|tags| !tags.trim().is_empty()),
            plural_form: api.plural_form,
            translations,
            alternative_words: api.alternatives.into_iter().map(|a| a.alternative).collect(),
            additional_descriptions,
        }
    }
}

impl ApiResponse {
    /// Convert every served term into a Term
    pub fn into_terms(self) -> Vec<Term> {
        self.terms.into_iter().map(Term::from).collect()
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
