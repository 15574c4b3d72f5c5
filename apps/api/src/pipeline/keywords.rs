//! Keyword list handling. Keywords come back from the analyzer in mixed case
//! and with stray whitespace; every comparison in the pipeline is
//! case-insensitive on trimmed text, while output keeps the casing of the
//! first occurrence seen.

/// An ordered set of distinct keyword phrases. Identity is the lowercased,
/// trimmed form; the stored phrase keeps its first-seen casing.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    phrases: Vec<String>,
}

/// Canonical comparison form for a keyword phrase.
pub fn fold(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for p in phrases {
            set.insert(p.as_ref());
        }
        set
    }

    /// Inserts a phrase unless an equivalent one is already present.
    /// Returns true if the phrase was new.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let trimmed = phrase.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.phrases.push(trimmed.to_string());
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        let key = fold(phrase);
        self.phrases.iter().any(|p| fold(p) == key)
    }

    pub fn extend<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for p in phrases {
            self.insert(p.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// Comma-joined rendering for prompt slots.
    pub fn join(&self) -> String {
        self.phrases.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_casing_wins() {
        let mut set = KeywordSet::new();
        assert!(set.insert("Python"));
        assert!(!set.insert("python"));
        assert!(!set.insert("  PYTHON  "));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Python"]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let set = KeywordSet::from_phrases(["SQL", "Tableau", "sql", "A/B Testing"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["SQL", "Tableau", "A/B Testing"]);
        assert_eq!(set.join(), "SQL, Tableau, A/B Testing");
    }

    #[test]
    fn test_empty_and_whitespace_phrases_are_dropped() {
        let set = KeywordSet::from_phrases(["", "   ", "SQL"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_contains_is_case_insensitive_on_trimmed_text() {
        let set = KeywordSet::from_phrases(["Product Analytics"]);
        assert!(set.contains(" product analytics "));
        assert!(!set.contains("product"));
    }
}
