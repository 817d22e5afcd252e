//! Name patterns used to select resources by their `name` attribute.

use std::fmt::{Display, Formatter};

use regex::Regex;

use crate::error::Error;

/// Pattern that matches every resource name. Used as the key of the catch-all
/// document produced when splitting.
pub const CATCH_ALL_PATTERN: &str = "^(.+)$";

/// Default split pattern: resources ending in `_tablet` go to their own document.
pub const TABLET_SPLIT_PATTERN: &str = "^(.+)_tablet$";

/// A compiled regular expression that is always matched against the whole name.
///
/// Keeps the pattern source around because split documents are keyed by it.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    pub fn new(source: &str) -> Result<Self, Error> {
        let regex = Regex::new(&format!("^(?:{})$", source))
            .map_err(|e| Error::invalid_pattern(source, e))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Compiles a list of patterns, failing on the first invalid one.
    pub fn compile_all<S: AsRef<str>>(sources: &[S]) -> Result<Vec<Self>, Error> {
        sources.iter().map(|s| Self::new(s.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if the whole `name` matches.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Returns the text of the first capture group when `name` fully matches and
    /// the group took part in the match.
    pub fn first_group<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Display for NamePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for NamePattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_whole_name_only() {
        let pattern = NamePattern::new("hello").unwrap();
        assert!(pattern.matches("hello"));
        assert!(!pattern.matches("hello_world"));
        assert!(!pattern.matches("say_hello"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let pattern = NamePattern::new("a|ab").unwrap();
        assert!(pattern.matches("ab"));
        assert!(!pattern.matches("abc"));
    }

    #[test]
    fn test_first_group() {
        let pattern = NamePattern::new(TABLET_SPLIT_PATTERN).unwrap();
        assert_eq!(pattern.first_group("title_tablet"), Some("title"));
        assert_eq!(pattern.first_group("title"), None);

        let no_groups = NamePattern::new("title_.*").unwrap();
        assert!(no_groups.matches("title_tablet"));
        assert_eq!(no_groups.first_group("title_tablet"), None);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NamePattern::new("(oops").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(oops"));
    }

    #[test]
    fn test_compile_all_and_display() {
        let patterns = NamePattern::compile_all(&[TABLET_SPLIT_PATTERN, CATCH_ALL_PATTERN]).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].to_string(), TABLET_SPLIT_PATTERN);
        assert_eq!(patterns[1].as_str(), CATCH_ALL_PATTERN);
        assert!(NamePattern::compile_all(&["ok", "(bad"]).is_err());
    }
}
