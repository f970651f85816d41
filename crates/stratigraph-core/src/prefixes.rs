//! Ignore and aggregation prefix sets.
//!
//! Both sets are read from plain-text side files, one prefix per line.
//! Blank lines and `#` comments are skipped; surrounding whitespace is
//! trimmed. There is no quoting or escaping.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ConfigError;

/// Built-in ignore prefixes used when no ignore list is configured.
pub const DEFAULT_IGNORES: &[&str] = &["java.", "javax.", "org.slf4j.", "lombok."];

/// Parses side-file content into a list of prefixes.
///
/// Order is preserved and duplicates are dropped.
#[must_use]
pub fn parse_prefix_lines(content: &str) -> Vec<String> {
    let mut prefixes: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !prefixes.iter().any(|p| p == line) {
            prefixes.push(line.to_owned());
        }
    }
    prefixes
}

/// Reads a prefix side file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read.
pub fn read_prefix_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_prefix_lines(&content))
}

/// Prefixes excluded from analysis.
///
/// Applied twice with different granularity: on raw import identifiers
/// while scanning ([`IgnoreSet::matches_identifier`]) and on resolved
/// package names while building edges ([`IgnoreSet::matches_package`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(Vec<String>);

impl IgnoreSet {
    /// Creates a set from the given prefixes.
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(prefixes.into_iter().map(Into::into).collect())
    }

    /// The built-in default ignore set.
    #[must_use]
    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORES.iter().copied())
    }

    /// `true` if `identifier` starts with any prefix.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.0.iter().any(|p| identifier.starts_with(p.as_str()))
    }

    /// `true` if `package` lies strictly below any prefix
    /// (`package.starts_with(prefix + ".")`).
    #[must_use]
    pub fn matches_package(&self, package: &str) -> bool {
        self.0.iter().any(|p| {
            package
                .strip_prefix(p.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// The configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Package prefixes that absorb all their subpackages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationSet(Vec<String>);

impl AggregationSet {
    /// Creates a set from the given prefixes.
    #[must_use]
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(prefixes.into_iter().map(Into::into).collect())
    }

    /// The configured prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.0
    }

    /// Pairs `(outer, inner)` where `inner` is nested below `outer`.
    ///
    /// Both entries can match the same package name.
    #[must_use]
    pub fn overlapping(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for outer in &self.0 {
            for inner in &self.0 {
                if inner
                    .strip_prefix(outer.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
                {
                    pairs.push((outer.as_str(), inner.as_str()));
                }
            }
        }
        pairs
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
