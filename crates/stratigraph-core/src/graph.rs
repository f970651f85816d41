//! Package dependency graph and its construction from an [`ImportIndex`].

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info};

use crate::prefixes::IgnoreSet;
use crate::resolver::PackageResolver;
use crate::types::{ImportIndex, PackageEdge, PackageName};

/// Weighted directed package graph.
///
/// Holds at most one edge per ordered `(from, to)` pair and never a
/// self-loop. Every edge target is also a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    adjacency: BTreeMap<PackageName, BTreeMap<PackageName, u32>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if not already present.
    pub fn add_node(&mut self, package: impl Into<PackageName>) {
        self.adjacency.entry(package.into()).or_default();
    }

    /// Inserts an edge, adding both endpoints as nodes.
    ///
    /// A self-loop or a second edge for an existing pair violates the
    /// graph invariants: it is logged and ignored, and `false` is returned.
    pub fn add_edge(&mut self, edge: PackageEdge) -> bool {
        if edge.from == edge.to {
            error!("Refusing self-loop edge {}", edge);
            return false;
        }

        self.add_node(edge.to.clone());
        let targets = self.adjacency.entry(edge.from.clone()).or_default();
        if targets.contains_key(&edge.to) {
            error!("Unexpected duplicate edge {}", edge);
            return false;
        }
        targets.insert(edge.to, edge.weight);
        true
    }

    /// Adds a node together with its outgoing target→weight map.
    pub fn add_targets(&mut self, package: &str, targets: &BTreeMap<PackageName, u32>) {
        self.add_node(package);
        for (to, weight) in targets {
            self.add_edge(PackageEdge::new(package, to.clone(), *weight));
        }
    }

    /// Returns `true` if `package` is a node.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.adjacency.contains_key(package)
    }

    /// Iterates over all nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageName> {
        self.adjacency.keys()
    }

    /// Outgoing target→weight map of `package` (empty for unknown nodes).
    ///
    /// This is the whole contract a renderer may consume.
    #[must_use]
    pub fn targets(&self, package: &str) -> Option<&BTreeMap<PackageName, u32>> {
        self.adjacency.get(package)
    }

    /// Iterates over `(node, targets)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &BTreeMap<PackageName, u32>)> {
        self.adjacency.iter()
    }

    /// Iterates over all edges ordered by `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = PackageEdge> + '_ {
        self.adjacency.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, weight)| PackageEdge::new(from.clone(), to.clone(), *weight))
        })
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Options for reducing class-level imports to package edges.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Keep only edges whose target package is declared in the scanned sources.
    pub only_internal: bool,
    /// Package-granularity ignore filter (`target.starts_with(prefix + ".")`).
    pub ignore: IgnoreSet,
}

/// Reduces an [`ImportIndex`] into a [`DependencyGraph`].
pub struct GraphBuilder<'a> {
    index: &'a ImportIndex,
    resolver: &'a PackageResolver,
    options: BuildOptions,
    packages: BTreeSet<PackageName>,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder over a finished index.
    #[must_use]
    pub fn new(index: &'a ImportIndex, resolver: &'a PackageResolver, options: BuildOptions) -> Self {
        let packages = resolver.package_names(index);
        Self {
            index,
            resolver,
            options,
            packages,
        }
    }

    /// Packages declared in the scanned sources.
    #[must_use]
    pub fn packages(&self) -> &BTreeSet<PackageName> {
        &self.packages
    }

    /// Counts the class-level references from `source` to every other package.
    #[must_use]
    pub fn edges_from(&self, source: &str) -> BTreeMap<PackageName, u32> {
        let mut result: BTreeMap<PackageName, u32> = BTreeMap::new();

        for (class, imports) in self.index.iter() {
            if self.resolver.resolve(class) != source {
                continue;
            }

            for reference in imports {
                if !reference.contains('.') {
                    continue;
                }

                // Textual test: also swallows siblings sharing the prefix
                if let Some(rest) = reference.strip_prefix(source) {
                    if !rest.starts_with('.') {
                        debug!(
                            "{} excluded from {} by textual prefix although it is not a subpackage",
                            reference, source
                        );
                    }
                    continue;
                }

                let target = self.resolver.resolve(reference);

                if self.options.only_internal && !self.packages.contains(&target) {
                    continue;
                }
                if self.options.ignore.matches_package(&target) {
                    continue;
                }

                debug!("{} -> {} via {}", source, target, reference);
                *result.entry(target).or_insert(0) += 1;
            }
        }

        result
    }

    /// Builds the complete graph.
    #[must_use]
    pub fn build(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for package in &self.packages {
            let targets = self.edges_from(package);
            graph.add_targets(package, &targets);
        }

        info!(
            "Built package graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}
