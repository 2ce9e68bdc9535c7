use crate::inspection::domain::RepoPath;
use crate::shared::Result;
use std::collections::BTreeSet;

/// Maximum number of patterns configured for one package type
const MAX_PATTERNS: usize = 32;

/// Maximum length of a single name pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// PatternMatcher - Selects candidate artifacts by file-name glob
///
/// Built from a comma-separated pattern list. Supports '*' to match zero or
/// more characters. A path is a candidate when its name matches any pattern,
/// so the result over several patterns is their union.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<NamePattern>,
}

impl PatternMatcher {
    /// Parses a comma-separated pattern list (e.g. "*.whl,*.tar.gz")
    ///
    /// Blank entries are skipped, so an empty list yields a matcher with no patterns.
    ///
    /// # Errors
    /// - Too many patterns (> MAX_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcard only)
    pub fn parse(patterns: &str) -> Result<Self> {
        let raw: Vec<&str> = patterns
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if raw.len() > MAX_PATTERNS {
            anyhow::bail!(
                "Too many name patterns: {} (maximum: {})",
                raw.len(),
                MAX_PATTERNS
            );
        }

        let patterns = raw
            .into_iter()
            .map(NamePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Checks whether a file name matches any pattern
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Returns the union of paths whose name matches any pattern
    pub fn find_candidates<I>(&self, paths: I) -> BTreeSet<RepoPath>
    where
        I: IntoIterator<Item = RepoPath>,
    {
        if self.is_empty() {
            return BTreeSet::new();
        }

        paths
            .into_iter()
            .filter(|path| !path.is_root() && self.matches(path.name()))
            .collect()
    }
}

/// A single compiled name pattern
#[derive(Debug, Clone)]
struct NamePattern {
    matcher: GlobMatcher,
}

impl NamePattern {
    fn new(pattern: &str) -> Result<Self> {
        validate_pattern(pattern)?;
        Ok(Self {
            matcher: compile_pattern(pattern),
        })
    }

    fn matches(&self, name: &str) -> bool {
        self.matcher.matches(name)
    }
}

/// Matcher variants for efficient matching
#[derive(Debug, Clone)]
enum GlobMatcher {
    /// Exact match: "name.jar"
    Exact(String),
    /// Leading wildcard: "*.tgz"
    EndsWith(String),
    /// Trailing wildcard: "lodash-*"
    StartsWith(String),
    /// Anchored segments: "pre*mid*suf"
    Segments {
        prefix: String,
        middle: Vec<String>,
        suffix: String,
    },
}

impl GlobMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            GlobMatcher::Exact(s) => name == s,
            GlobMatcher::EndsWith(suffix) => name.ends_with(suffix.as_str()),
            GlobMatcher::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            GlobMatcher::Segments {
                prefix,
                middle,
                suffix,
            } => {
                if name.len() < prefix.len() + suffix.len()
                    || !name.starts_with(prefix.as_str())
                    || !name.ends_with(suffix.as_str())
                {
                    return false;
                }
                // Middle parts must appear in order between the anchored ends
                let mut rest = &name[prefix.len()..name.len() - suffix.len()];
                for part in middle {
                    match rest.find(part.as_str()) {
                        Some(pos) => rest = &rest[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Name pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    for ch in pattern.chars() {
        if !is_valid_pattern_char(ch) {
            anyhow::bail!(
                "Name pattern contains invalid character '{}' in pattern '{}'. \
                 Only alphanumeric, hyphens, underscores, dots, plus signs, and asterisks (*) are allowed.",
                ch,
                pattern
            );
        }
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!("Name pattern cannot contain only wildcards: '{}'", pattern);
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '+' || c == '*'
}

fn compile_pattern(pattern: &str) -> GlobMatcher {
    let wildcard_count = pattern.matches('*').count();

    if wildcard_count == 0 {
        return GlobMatcher::Exact(pattern.to_string());
    }

    if wildcard_count == 1 {
        if let Some(stripped) = pattern.strip_prefix('*') {
            return GlobMatcher::EndsWith(stripped.to_string());
        }
        if let Some(stripped) = pattern.strip_suffix('*') {
            return GlobMatcher::StartsWith(stripped.to_string());
        }
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let prefix = parts.first().copied().unwrap_or_default().to_string();
    let suffix = parts.last().copied().unwrap_or_default().to_string();
    let middle = parts[1..parts.len() - 1]
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    GlobMatcher::Segments {
        prefix,
        middle,
        suffix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<RepoPath> {
        names.iter().map(|n| RepoPath::new("repo", *n)).collect()
    }

    #[test]
    fn test_exact_match() {
        let matcher = PatternMatcher::parse("app.jar").unwrap();
        assert!(matcher.matches("app.jar"));
        assert!(!matcher.matches("my-app.jar"));
    }

    #[test]
    fn test_extension_wildcard() {
        let matcher = PatternMatcher::parse("*.tgz").unwrap();
        assert!(matcher.matches("lodash-4.17.21.tgz"));
        assert!(!matcher.matches("lodash-4.17.21.tgz.sha1"));
        assert!(!matcher.matches("package.json"));
    }

    #[test]
    fn test_prefix_wildcard() {
        let matcher = PatternMatcher::parse("lodash-*").unwrap();
        assert!(matcher.matches("lodash-4.17.21.tgz"));
        assert!(!matcher.matches("my-lodash-1.tgz"));
    }

    #[test]
    fn test_segments_are_anchored() {
        let matcher = PatternMatcher::parse("lib*-*.jar").unwrap();
        assert!(matcher.matches("libfoo-1.0.jar"));
        assert!(!matcher.matches("xlibfoo-1.0.jar"));
        assert!(!matcher.matches("libfoo-1.0.jar.md5"));
        assert!(!matcher.matches("libfoo.jar"));
    }

    #[test]
    fn test_inner_wildcard() {
        let matcher = PatternMatcher::parse("a*z").unwrap();
        assert!(matcher.matches("az"));
        assert!(matcher.matches("abcz"));
        assert!(!matcher.matches("a"));
    }

    #[test]
    fn test_union_of_patterns() {
        let matcher = PatternMatcher::parse("*.whl, *.tar.gz").unwrap();
        assert_eq!(matcher.pattern_count(), 2);

        let candidates = matcher.find_candidates(paths(&[
            "requests/requests-2.31.0-py3-none-any.whl",
            "requests/requests-2.31.0.tar.gz",
            "requests/index.html",
        ]));
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_overlapping_patterns_yield_each_path_once() {
        let matcher = PatternMatcher::parse("*.tar.gz,*.gz").unwrap();
        let candidates = matcher.find_candidates(paths(&["a/pkg-1.0.tar.gz"]));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_empty_pattern_list_finds_nothing() {
        let matcher = PatternMatcher::parse(" , ").unwrap();
        assert!(matcher.is_empty());
        assert!(matcher.find_candidates(paths(&["a.tgz"])).is_empty());
    }

    #[test]
    fn test_root_is_never_a_candidate() {
        let matcher = PatternMatcher::parse("*repo*").unwrap();
        let candidates = matcher.find_candidates(vec![RepoPath::root("repo")]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_invalid_characters_rejected() {
        let result = PatternMatcher::parse("*.tgz;rm -rf");
        assert!(result.unwrap_err().to_string().contains("invalid character"));
    }

    #[test]
    fn test_wildcard_only_rejected() {
        let result = PatternMatcher::parse("**");
        assert!(result.unwrap_err().to_string().contains("only wildcards"));
    }

    #[test]
    fn test_too_many_patterns() {
        let list = vec!["*.a"; MAX_PATTERNS + 1].join(",");
        let result = PatternMatcher::parse(&list);
        assert!(result.unwrap_err().to_string().contains("Too many name patterns"));
    }
}
