//! Markdown rendering of the glossary for documentation and prompt context.

use crate::term::Term;

const HEADER: &str = "# Glossary";
const INTRO: &str = "Each entry lists the canonical term, its alternative spellings, \
                     a description and translations.";

/// Render every term as one markdown document
pub fn render_markdown(terms: &[Term]) -> String {
    let mut lines = vec![HEADER.to_string(), String::new(), INTRO.to_string(), String::new()];
    lines.extend(terms.iter().map(render_term));
    lines.join("\n")
}

/// Render a single term section, terminated by a `---` separator
pub fn render_term(term: &Term) -> String {
    let mut lines = vec![format!("## {}", term.term)];

    if let Some(tags) = term.tags.as_deref().filter(|tags| !tags.trim().is_empty()) {
        lines.push(format!("**Tag:** {}", tags));
        lines.push(String::new());
    }

    if !term.alternative_words.is_empty() {
        lines.push(format!(
            "**Alternative words:** {}",
            term.alternative_words.join(", ")
        ));
        lines.push(String::new());
    }

    lines.push(format!("**Description:** {}", term.description));
    lines.push(String::new());

    // BTreeMap iteration is already sorted by language code
    if !term.translations.is_empty() {
        lines.push("**Translations:**".to_string());
        for (code, translation) in &term.translations {
            lines.push(format!("- {}: {}", code.to_uppercase(), translation));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
