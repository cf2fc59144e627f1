//! Regex patterns used when recovering fields from label text.
//!
//! All patterns are compiled once. The `regex` crate matches in linear
//! time, so recovery stays bounded by input length.

use std::sync::LazyLock;

use regex::Regex;

/// A compiled recovery pattern.
#[derive(Debug)]
pub struct TextPattern {
    /// Name of the pattern for identification.
    pub name: &'static str,

    /// Description of what this pattern matches.
    pub description: &'static str,

    /// The compiled regex.
    regex: Regex,
}

impl TextPattern {
    /// Create a new text pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn new(name: &'static str, description: &'static str, pattern: &str) -> Self {
        Self {
            name,
            description,
            regex: Regex::new(pattern).expect("Invalid regex pattern"),
        }
    }

    /// Check if the pattern covers the whole content.
    #[must_use]
    pub fn matches_whole(&self, content: &str) -> bool {
        self.regex
            .find(content)
            .is_some_and(|m| m.start() == 0 && m.end() == content.len())
    }

    /// The last occurrence in the content.
    #[must_use]
    pub fn find_last<'a>(&self, content: &'a str) -> Option<&'a str> {
        self.regex.find_iter(content).last().map(|m| m.as_str())
    }
}

/// Brazilian postal code: `DDDDD-DDD` or eight consecutive digits.
pub static POSTAL_CODE: LazyLock<TextPattern> = LazyLock::new(|| {
    TextPattern::new(
        "postal_code",
        "CEP written as DDDDD-DDD or 8 consecutive digits",
        r"\b[0-9]{5}-[0-9]{3}\b|\b[0-9]{8}\b",
    )
});

/// A house number token such as `123`, `45A`, `12/3` or `s/n`.
pub static HOUSE_NUMBER: LazyLock<TextPattern> = LazyLock::new(|| {
    TextPattern::new(
        "house_number",
        "Street number starting with a digit, or s/n for no number",
        r"(?i)^(?:[0-9][0-9A-Za-z/-]*|s/?n\.?)$",
    )
});
