//! Core data model: class names, the import index and package edges.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Fully qualified dotted class identifier (e.g. `com.acme.model.User`).
pub type ClassName = String;

/// Package name derived from a [`ClassName`] by the resolver.
pub type PackageName = String;

/// Class-level import index built by a single scan.
///
/// Maps each declaring class to the set of identifiers it imports.
/// Duplicate imports collapse; insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportIndex {
    imports: BTreeMap<ClassName, BTreeSet<ClassName>>,
}

impl ImportIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaring class without adding imports.
    pub fn declare(&mut self, class: impl Into<ClassName>) {
        self.imports.entry(class.into()).or_default();
    }

    /// Adds an imported identifier to the entry of `class`.
    ///
    /// Returns `true` if the import was not present before.
    pub fn add_import(&mut self, class: impl Into<ClassName>, target: impl Into<ClassName>) -> bool {
        self.imports
            .entry(class.into())
            .or_default()
            .insert(target.into())
    }

    /// Merges another index into this one (set union per class).
    pub fn merge(&mut self, other: Self) {
        for (class, targets) in other.imports {
            self.imports.entry(class).or_default().extend(targets);
        }
    }

    /// Imports recorded for `class`, if it was declared.
    #[must_use]
    pub fn imports_of(&self, class: &str) -> Option<&BTreeSet<ClassName>> {
        self.imports.get(class)
    }

    /// Iterates over `(declaring class, imports)` in class-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &BTreeSet<ClassName>)> {
        self.imports.iter()
    }

    /// Iterates over the declaring classes.
    pub fn classes(&self) -> impl Iterator<Item = &ClassName> {
        self.imports.keys()
    }

    /// Number of declaring classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Returns `true` if no class was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Total number of distinct class-level imports.
    #[must_use]
    pub fn import_count(&self) -> usize {
        self.imports.values().map(BTreeSet::len).sum()
    }
}

/// A weighted directed edge between two distinct packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageEdge {
    /// Depending package.
    pub from: PackageName,
    /// Package depended upon.
    pub to: PackageName,
    /// Number of class-level imports collapsed into this edge.
    pub weight: u32,
}

impl PackageEdge {
    /// Creates a new edge.
    #[must_use]
    pub fn new(from: impl Into<PackageName>, to: impl Into<PackageName>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

impl std::fmt::Display for PackageEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.weight)
    }
}
