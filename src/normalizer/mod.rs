// Glossary normalizer - rewrites free text so every known variation of a term
// is replaced by the term's canonical form.
//
// Terms are applied longest canonical form first (ties broken by id), each
// variation in turn, and every pass works on the output of the previous one.

mod matcher;

use std::collections::HashSet;

use crate::term::Term;
use matcher::VariationMatcher;

/// Error raised when a term cannot take part in normalization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid term {id}: {reason}")]
pub struct InvalidTermError {
    /// Id of the offending term
    pub id: i64,
    /// What is wrong with it
    pub reason: String,
}

/// Compiled rules for a single term
#[derive(Debug, Clone)]
struct TermRule {
    canonical: String,
    matchers: Vec<VariationMatcher>,
}

/// Normalizer built once from a term snapshot and reusable across inputs
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: Vec<TermRule>,
}

impl Normalizer {
    /// Build a normalizer from a term snapshot.
    ///
    /// Fails on the first term whose canonical form is empty or blank, since
    /// such a term would match everywhere.
    pub fn new(terms: &[Term]) -> Result<Self, InvalidTermError> {
        let rules = order_terms(terms)
            .into_iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Build a normalizer, leaving out invalid terms instead of failing
    pub fn skipping_invalid(terms: &[Term]) -> Self {
        let rules = order_terms(terms)
            .into_iter()
            .filter_map(|term| match compile_rule(term) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    crate::warn!("Skipping term during normalization: {}", e);
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// Number of terms taking part in normalization
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no term takes part in normalization
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all term substitutions to `text`.
    /// Returns the input unchanged when no variation occurs as a whole word.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();
        if result.is_empty() {
            return result;
        }

        for rule in &self.rules {
            for matcher in &rule.matchers {
                if let Some(replaced) = matcher.replace_all(&result, &rule.canonical) {
                    result = replaced;
                }
            }
        }

        result
    }
}

/// Normalize `text` against a term snapshot in one call
pub fn normalize(text: &str, terms: &[Term]) -> Result<String, InvalidTermError> {
    Ok(Normalizer::new(terms)?.normalize(text))
}

/// Sort by canonical length (in characters) descending, then by id.
/// The sort is stable, so full ties keep snapshot order.
fn order_terms(terms: &[Term]) -> Vec<&Term> {
    let mut ordered: Vec<&Term> = terms.iter().collect();
    ordered.sort_by(|a, b| {
        b.term
            .chars()
            .count()
            .cmp(&a.term.chars().count())
            .then(a.id.cmp(&b.id))
    });
    ordered
}

fn compile_rule(term: &Term) -> Result<TermRule, InvalidTermError> {
    if term.term.trim().is_empty() {
        return Err(InvalidTermError {
            id: term.id,
            reason: "canonical form is empty".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let matchers = term
        .variations()
        .filter(|variation| seen.insert(*variation))
        .map(|variation| {
            VariationMatcher::new(variation, term.case_sensitive).map_err(|e| InvalidTermError {
                id: term.id,
                reason: format!("variation '{}' cannot be matched: {}", variation, e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TermRule {
        canonical: term.term.clone(),
        matchers,
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
