//! Inclusion-pattern configuration.

use regex::Regex;

use crate::gate::GateError;

/// Newline-delimited inclusion-pattern configuration.
///
/// Holds the raw pattern text exactly as configured, one regular expression
/// per line. Immutable once constructed. Empty or whitespace-only text is the
/// distinguished "no restriction" state: the gate builds unconditionally.
#[derive(Debug, Clone)]
pub struct IncludePathsConfig {
    included_paths: String,
}

impl IncludePathsConfig {
    /// Creates a configuration from raw newline-delimited pattern text.
    pub fn new(included_paths: impl Into<String>) -> Self {
        Self {
            included_paths: included_paths.into(),
        }
    }

    /// Whether no restriction is configured (empty or whitespace-only text).
    pub fn is_unrestricted(&self) -> bool {
        self.included_paths.trim().is_empty()
    }

    /// The raw pattern text as configured.
    pub fn raw(&self) -> &str {
        &self.included_paths
    }

    /// Compiles one inclusion pattern per non-empty line.
    ///
    /// Each line is trimmed and lower-cased before compilation. Paths are
    /// later matched case-sensitively as given, so a pattern with uppercase
    /// path segments will generally fail to match. This asymmetry is the
    /// historical contract and is preserved as-is.
    pub fn patterns(&self) -> Result<Vec<InclusionPattern>, GateError> {
        self.included_paths
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(InclusionPattern::compile)
            .collect()
    }
}

/// A single compiled inclusion pattern.
///
/// Patterns are full regular expressions, not globs: `.` matches any
/// character. Compilation anchors the pattern with `^(?:...)$`, so it must
/// describe the entire path to match, so `dir3` does not match
/// `src/dir3/test.java`.
#[derive(Debug, Clone)]
pub struct InclusionPattern {
    source: String,
    regex: Regex,
}

impl InclusionPattern {
    /// Compiles one configuration line into an anchored pattern.
    pub fn compile(line: &str) -> Result<Self, GateError> {
        let source = line.trim().to_lowercase();
        let regex =
            Regex::new(&format!("^(?:{source})$")).map_err(|e| GateError::InvalidPatternSyntax {
                pattern: source.clone(),
                source: e,
            })?;

        Ok(Self { source, regex })
    }

    /// Whether the pattern matches the full path string.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The pattern text after trimming and lower-casing.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_unrestricted() {
        assert!(IncludePathsConfig::new("").is_unrestricted());
    }

    #[test]
    fn whitespace_text_is_unrestricted() {
        assert!(IncludePathsConfig::new("  \n\t\n  ").is_unrestricted());
    }

    #[test]
    fn pattern_text_is_restricted() {
        assert!(!IncludePathsConfig::new("src/.*").is_unrestricted());
    }

    #[test]
    fn one_pattern_per_nonempty_line() {
        let config = IncludePathsConfig::new("src/.*\\.rb\n\nlib/.*\\.jar\n");
        let patterns = config.patterns().unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].as_str(), "src/.*\\.rb");
        assert_eq!(patterns[1].as_str(), "lib/.*\\.jar");
    }

    #[test]
    fn lines_are_trimmed_and_lowercased() {
        let config = IncludePathsConfig::new("  SRC/Dir1/.*  ");
        let patterns = config.patterns().unwrap();
        assert_eq!(patterns[0].as_str(), "src/dir1/.*");
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let config = IncludePathsConfig::new("src/[unclosed");
        let err = config.patterns().unwrap_err();
        assert!(matches!(err, GateError::InvalidPatternSyntax { .. }));
    }

    #[test]
    fn pattern_requires_full_match() {
        let pattern = InclusionPattern::compile("dir3").unwrap();
        assert!(!pattern.matches("src/dir3/test.java"));
        assert!(pattern.matches("dir3"));
    }

    #[test]
    fn dot_matches_any_character() {
        // Patterns are regexes, not globs: "." is a wildcard, not a literal.
        let pattern = InclusionPattern::compile("src/main.rs").unwrap();
        assert!(pattern.matches("src/mainxrs"));
    }
}
