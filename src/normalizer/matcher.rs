// Literal whole-word matcher for a single term variation.
//
// The variation is escaped before compilation so pattern metacharacters only
// match themselves. Word boundaries are checked by hand against the characters
// adjoining each candidate instead of with `\b`, so variations that start or
// end with punctuation ("C++", "(beta)") still match at word edges.

use regex::{Regex, RegexBuilder};

/// Compiled matcher for one literal variation
#[derive(Debug, Clone)]
pub(crate) struct VariationMatcher {
    regex: Regex,
}

impl VariationMatcher {
    /// Compile `variation` as literal text, optionally ignoring letter case
    pub(crate) fn new(variation: &str, case_sensitive: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&regex::escape(variation))
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self { regex })
    }

    /// Replace every whole-word occurrence in `text` with `replacement`.
    ///
    /// Matches are found left to right and never overlap. The replacement is
    /// inserted verbatim. Returns `None` when nothing matched so the caller can
    /// keep the input untouched.
    pub(crate) fn replace_all(&self, text: &str, replacement: &str) -> Option<String> {
        let mut output: Option<String> = None;
        let mut copied_up_to = 0;
        let mut position = 0;

        while position < text.len() {
            let Some(found) = self.regex.find_at(text, position) else {
                break;
            };

            if found.is_empty() {
                break;
            }

            if is_whole_word(text, found.start(), found.end()) {
                let buffer = output.get_or_insert_with(|| String::with_capacity(text.len()));
                buffer.push_str(&text[copied_up_to..found.start()]);
                buffer.push_str(replacement);
                copied_up_to = found.end();
                position = found.end();
            } else {
                // A rejected candidate may hide a valid one starting inside it
                position = found.start() + char_width_at(text, found.start());
            }
        }

        output.map(|mut buffer| {
            buffer.push_str(&text[copied_up_to..]);
            buffer
        })
    }
}

/// Word-constituent characters: letters, digits and underscore
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when neither neighbour of `text[start..end]` is a word character
pub(crate) fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn char_width_at(text: &str, index: usize) -> usize {
    text[index..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
#[path = "matcher_test.rs"]
mod tests;
