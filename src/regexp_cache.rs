use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Compiled regexes shared between every formatting session. Metadata
/// patterns are compiled on first use and live as long as the cache.
pub struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            Ok(regex.value().clone())
        } else {
            let entry = self.cache.entry(pattern.to_string()).or_try_insert_with(|| {
                regex::Regex::new(pattern).map(Arc::new)
            })?;
            Ok(entry.value().clone())
        }
    }

    /// Returns a regex that matches only when `pattern` covers the whole
    /// input. Alternations are grouped so every branch is anchored.
    pub fn get_full_match_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        self.get_regex(&fast_cat::concat_str!("^(?:", pattern, ")$"))
    }

    /// Returns a regex anchored at the start of the input.
    pub fn get_prefix_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        self.get_regex(&fast_cat::concat_str!("^(?:", pattern, ")"))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::RegexCache;

    #[test]
    fn reuses_compiled_regex() {
        let cache = RegexCache::with_capacity(4);
        let first = cache.get_regex("\\d{3}").unwrap();
        let second = cache.get_regex("\\d{3}").unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(1, cache.len());
    }

    #[test]
    fn full_match_anchors_every_alternative() {
        let cache = RegexCache::with_capacity(4);
        let regex = cache.get_full_match_regex("1|12").unwrap();
        assert!(regex.is_match("12"));
        assert!(regex.is_match("1"));
        assert!(!regex.is_match("123"));
        assert!(!regex.is_match("012"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let cache = RegexCache::with_capacity(4);
        assert!(cache.get_regex("(\\d").is_err());
        assert_eq!(0, cache.len());
    }
}
