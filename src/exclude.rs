//! Selector exclusion matching
//!
//! An exclude entry is either a literal substring or a regular expression.
//! In configuration text, entries written `/.../` compile to patterns;
//! anything else matches by substring containment. Patterns compile once
//! when options are built, so a malformed pattern surfaces as a
//! configuration error instead of failing mid-run.

use regex::Regex;

/// Error type for exclude-pattern compilation
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid exclude pattern '{pattern}': {source}")]
pub struct ExcludeError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A single selector exclusion entry.
#[derive(Debug, Clone)]
pub enum ExcludePattern {
    /// Matches any selector containing this substring
    Literal(String),
    /// Matches any selector the expression finds a match in
    Pattern(Regex),
}

impl ExcludePattern {
    /// Parse a configuration entry.
    ///
    /// `/.../`-delimited entries compile as regular expressions; everything
    /// else is a literal substring.
    ///
    /// # Examples
    ///
    /// ```
    /// use transform3d::exclude::ExcludePattern;
    ///
    /// let literal = ExcludePattern::parse(".no-transform").unwrap();
    /// assert!(literal.matches(".sidebar .no-transform"));
    ///
    /// let pattern = ExcludePattern::parse("/^\\.no-/").unwrap();
    /// assert!(pattern.matches(".no-gpu"));
    /// assert!(!pattern.matches(".main"));
    /// ```
    pub fn parse(entry: &str) -> Result<Self, ExcludeError> {
        if entry.len() >= 2 && entry.starts_with('/') && entry.ends_with('/') {
            let body = &entry[1..entry.len() - 1];
            let re = Regex::new(body)
                .map_err(|source| ExcludeError { pattern: entry.to_string(), source })?;
            Ok(ExcludePattern::Pattern(re))
        } else {
            Ok(ExcludePattern::Literal(entry.to_string()))
        }
    }

    /// Whether this entry matches `selector`.
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            ExcludePattern::Literal(s) => selector.contains(s.as_str()),
            ExcludePattern::Pattern(re) => re.is_match(selector),
        }
    }
}

/// Whether any entry in `patterns` matches `selector`.
///
/// An empty list excludes nothing.
pub fn is_excluded(selector: &str, patterns: &[ExcludePattern]) -> bool {
    patterns.iter().any(|p| p.matches(selector))
}

/// Parse a list of configuration entries, failing on the first bad pattern.
pub fn parse_patterns(entries: &[String]) -> Result<Vec<ExcludePattern>, ExcludeError> {
    entries.iter().map(|e| ExcludePattern::parse(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_excludes_nothing() {
        assert!(!is_excluded(".anything", &[]));
    }

    #[test]
    fn test_literal_substring_containment() {
        let patterns = parse_patterns(&[".no-transform".to_string()]).unwrap();
        assert!(is_excluded(".no-transform", &patterns));
        assert!(is_excluded(".card .no-transform:hover", &patterns));
        assert!(!is_excluded(".transforms", &patterns));
    }

    #[test]
    fn test_pattern_entry() {
        let patterns = parse_patterns(&["/\\.no-/".to_string()]).unwrap();
        assert!(is_excluded(".no-transform", &patterns));
        assert!(is_excluded(".no-gpu", &patterns));
        assert!(!is_excluded(".yes-gpu", &patterns));
    }

    #[test]
    fn test_anchored_pattern() {
        let patterns = parse_patterns(&["/^\\.legacy/".to_string()]).unwrap();
        assert!(is_excluded(".legacy-box", &patterns));
        assert!(!is_excluded(".main .legacy-box", &patterns));
    }

    #[test]
    fn test_any_entry_matches() {
        let patterns =
            parse_patterns(&[".a".to_string(), "/^#header/".to_string()]).unwrap();
        assert!(is_excluded(".a", &patterns));
        assert!(is_excluded("#header nav", &patterns));
        assert!(!is_excluded(".b", &patterns));
    }

    #[test]
    fn test_slash_only_is_literal() {
        // A lone "/" cannot be a pattern delimiter pair
        let pattern = ExcludePattern::parse("/").unwrap();
        assert!(matches!(pattern, ExcludePattern::Literal(_)));
    }

    #[test]
    fn test_malformed_pattern_is_config_error() {
        let err = ExcludePattern::parse("/(unclosed/").unwrap_err();
        assert!(err.to_string().contains("invalid exclude pattern"));
        assert_eq!(err.pattern, "/(unclosed/");
    }
}
