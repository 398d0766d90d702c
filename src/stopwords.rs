//! Stop-word configuration for the tag cloud.
//!
//! The excluded-term set is an explicit value built once at startup and passed
//! into the layout engine, rather than global state. It combines a language
//! stop-word list with a fixed list of domain terms that are too generic to be
//! interesting in publication titles.

use std::collections::HashSet;
use stop_words::{get, LANGUAGE};

/// Domain terms excluded from the tag cloud on top of the language list.
pub const EXTRA_STOP_WORDS: &[&str] = &[
    "using", "approach", "method", "based", "case", "within", "use", "via", "towards", "methods",
];

/// Immutable set of terms excluded from frequency ranking.
///
/// Matching is exact and case-sensitive; tokens are lower-cased before lookup,
/// so the set is expected to hold lower-case entries.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from a base language list and an extra domain list.
    pub fn new<I, J, S, T>(base: I, extra: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let words = base
            .into_iter()
            .map(Into::into)
            .chain(extra.into_iter().map(Into::into))
            .collect();
        Self { words }
    }

    /// Default configuration: English stop words plus [`EXTRA_STOP_WORDS`].
    pub fn english() -> Self {
        Self::new(get(LANGUAGE::English), EXTRA_STOP_WORDS.iter().copied())
    }

    /// Check whether a term is excluded.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Number of excluded terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the set excludes nothing.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_contains_extra_terms() {
        let set = StopwordSet::english();
        assert!(set.contains("using"));
        assert!(set.contains("towards"));
        assert!(set.contains("the"));
        assert!(!set.contains("caching"));
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let set = StopwordSet::english();
        // Tokens are lower-cased before lookup; upper-case entries don't match.
        assert!(!set.contains("The"));
    }

    #[test]
    fn test_custom_sets() {
        let set = StopwordSet::new(vec!["alpha"], vec!["beta"]);
        assert!(set.contains("alpha"));
        assert!(set.contains("beta"));
        assert!(!set.contains("gamma"));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
