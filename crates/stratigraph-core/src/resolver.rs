//! Package resolution: maps class names to (possibly aggregated) packages.

use std::collections::BTreeSet;

use crate::prefixes::AggregationSet;
use crate::types::{ImportIndex, PackageName};

/// Derives package names from fully qualified class names.
///
/// The package is the text before the last `.`. If that name lies below an
/// aggregation prefix it is replaced with the prefix. When several prefixes
/// match, the longest one wins.
#[derive(Debug, Clone, Default)]
pub struct PackageResolver {
    /// Aggregation prefixes sorted by length descending.
    aggregations: Vec<String>,
}

impl PackageResolver {
    /// Build a resolver from the aggregation set.
    #[must_use]
    pub fn new(aggregations: &AggregationSet) -> Self {
        for (outer, inner) in aggregations.overlapping() {
            tracing::warn!(
                "Aggregation prefixes {} and {} overlap; the longer prefix wins",
                outer,
                inner
            );
        }

        let mut sorted: Vec<String> = aggregations.prefixes().to_vec();
        // Longest prefix first for deterministic matching
        sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self {
            aggregations: sorted,
        }
    }

    /// Which package does this class belong to?
    ///
    /// A name without any `.` resolves to the empty (default) package.
    #[must_use]
    pub fn resolve(&self, class_name: &str) -> PackageName {
        let package = class_name
            .rfind('.')
            .map_or("", |idx| &class_name[..idx]);

        for prefix in &self.aggregations {
            if package
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
            {
                tracing::debug!("Aggregating {} into {}", package, prefix);
                return prefix.clone();
            }
        }

        package.to_owned()
    }

    /// All packages derivable from the declaring classes of `index`.
    #[must_use]
    pub fn package_names(&self, index: &ImportIndex) -> BTreeSet<PackageName> {
        index.classes().map(|c| self.resolve(c)).collect()
    }
}
