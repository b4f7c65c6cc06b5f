use regex::{Regex, RegexBuilder};

use crate::errors::{GrepError, GrepResult};

/// How a pattern is compared against a line
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Plain substring search, like `line.contains(pattern)`
    Literal(String),
    Regex(Regex),
}

/// Options that control how a pattern is compiled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Treat the pattern as a regular expression instead of a literal
    pub is_regex: bool,
    /// Match without regard to letter case
    pub ignore_case: bool,
}

/// Matches a single pattern against lines of text
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    strategy: MatchStrategy,
}

impl PatternMatcher {
    /// Compiles `pattern` according to `options`.
    ///
    /// Empty patterns are rejected because they would match every line.
    pub fn new(pattern: &str, options: MatchOptions) -> GrepResult<Self> {
        if pattern.is_empty() {
            return Err(GrepError::invalid_pattern("pattern must not be empty"));
        }

        let strategy = if !options.is_regex && !options.ignore_case {
            MatchStrategy::Literal(pattern.to_string())
        } else {
            let source = if options.is_regex {
                pattern.to_string()
            } else {
                regex::escape(pattern)
            };
            let regex = RegexBuilder::new(&source)
                .case_insensitive(options.ignore_case)
                .build()
                .map_err(|e| GrepError::invalid_pattern(e.to_string()))?;
            MatchStrategy::Regex(regex)
        };

        Ok(Self { strategy })
    }

    /// Shorthand for a case-sensitive literal matcher
    pub fn literal(pattern: &str) -> GrepResult<Self> {
        Self::new(pattern, MatchOptions::default())
    }

    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Returns true if the line contains the pattern
    pub fn is_match(&self, line: &str) -> bool {
        match &self.strategy {
            MatchStrategy::Literal(pattern) => line.contains(pattern.as_str()),
            MatchStrategy::Regex(regex) => regex.is_match(line),
        }
    }

    /// Finds the byte spans of all non-overlapping matches in `line`, in order
    pub fn find_spans(&self, line: &str) -> Vec<(usize, usize)> {
        match &self.strategy {
            MatchStrategy::Literal(pattern) => line
                .match_indices(pattern.as_str())
                .map(|(start, matched)| (start, start + matched.len()))
                .collect(),
            MatchStrategy::Regex(regex) => regex
                .find_iter(line)
                .filter(|m| m.start() != m.end())
                .map(|m| (m.start(), m.end()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_matching() {
        let matcher = PatternMatcher::literal("test").unwrap();
        let text = "this is a test string with test pattern";
        assert!(matcher.is_match(text));

        let spans = matcher.find_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].0..spans[0].1], "test");
        assert_eq!(&text[spans[1].0..spans[1].1], "test");
        assert!(matches!(matcher.strategy(), MatchStrategy::Literal(_)));
    }

    #[test]
    fn test_literal_treats_metacharacters_literally() {
        let matcher = PatternMatcher::literal("a.c").unwrap();
        assert!(matcher.is_match("xa.cx"));
        assert!(!matcher.is_match("abc"));
    }

    #[test]
    fn test_regex_matching() {
        let options = MatchOptions {
            is_regex: true,
            ignore_case: false,
        };
        let matcher = PatternMatcher::new(r"\btest\w+", options).unwrap();
        assert_eq!(matcher.find_spans("testing tests tested").len(), 3);
        assert!(!matcher.is_match("test"));
    }

    #[test]
    fn test_ignore_case_literal_is_escaped() {
        let options = MatchOptions {
            is_regex: false,
            ignore_case: true,
        };
        let matcher = PatternMatcher::new("A.B", options).unwrap();
        assert!(matcher.is_match("xx a.b yy"));
        assert!(!matcher.is_match("axb"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = PatternMatcher::literal("").unwrap_err();
        assert!(matches!(err, GrepError::InvalidPattern(_)));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let options = MatchOptions {
            is_regex: true,
            ignore_case: false,
        };
        let err = PatternMatcher::new("(unclosed", options).unwrap_err();
        assert!(matches!(err, GrepError::InvalidPattern(_)));
    }

    #[test]
    fn test_zero_width_regex_spans_skipped() {
        let options = MatchOptions {
            is_regex: true,
            ignore_case: false,
        };
        let matcher = PatternMatcher::new("x*", options).unwrap();
        assert!(matcher.is_match("abc"));
        assert_eq!(matcher.find_spans("axxb"), vec![(1, 3)]);
    }
}
