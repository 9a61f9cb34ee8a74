//! Path-to-pattern matching.

use crate::config::InclusionPattern;

/// Whether the path matches at least one inclusion pattern.
///
/// The path is normalized to forward-slash separators first. Patterns are
/// OR'd: the result is true as soon as any one matches, and independent of
/// the order patterns are checked in.
pub fn is_included(path: &str, patterns: &[InclusionPattern]) -> bool {
    let normalized = normalize_separators(path);
    patterns.iter().any(|pattern| pattern.matches(&normalized))
}

/// Converts backslash separators to forward slashes.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
