//! Layer stratification of a package graph.
//!
//! Nodes without outgoing edges form layer 0. Each further layer holds the
//! nodes whose outgoing edges all point into layers already settled. When
//! no further node qualifies, the remaining nodes are unresolved: they lie
//! on a cycle or depend on one.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use crate::graph::DependencyGraph;
use crate::types::{PackageEdge, PackageName};

/// Outgoing edges of an unresolved node that block its layering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffendingEdges {
    /// The unresolved node.
    pub package: PackageName,
    /// Edges whose target is not settled, sorted by target name.
    pub edges: Vec<PackageEdge>,
}

/// Outcome of [`stratify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StratificationResult {
    /// Layers in dependency order; layer 0 is always present.
    pub layers: Vec<BTreeSet<PackageName>>,
    /// Nodes that could not be assigned to any layer.
    pub unresolved: BTreeSet<PackageName>,
    /// `settled * 100 / total`, rounded down; 100 for an empty graph.
    pub percentage: u8,
    /// One entry per unresolved node, in node order.
    pub offending: Vec<OffendingEdges>,
    /// Strongly connected components of more than one unresolved node.
    pub cycles: Vec<Vec<PackageName>>,
}

impl StratificationResult {
    /// Number of nodes assigned to a layer.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        self.layers.iter().map(BTreeSet::len).sum()
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.settled_count() + self.unresolved.len()
    }

    /// `true` if every node is layered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Layer index of `package`, if it was settled.
    #[must_use]
    pub fn layer_of(&self, package: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.contains(package))
    }
}

/// Partitions the graph into layers.
#[must_use]
pub fn stratify(graph: &DependencyGraph) -> StratificationResult {
    let layer0: BTreeSet<PackageName> = graph
        .iter()
        .filter(|(_, targets)| targets.is_empty())
        .map(|(node, _)| node.clone())
        .collect();

    let mut settled: BTreeSet<PackageName> = layer0.clone();
    let mut layers = vec![layer0];

    loop {
        // Membership is decided against `settled` as of iteration start
        let next: BTreeSet<PackageName> = graph
            .iter()
            .filter(|(node, _)| !settled.contains(*node))
            .filter(|(_, targets)| targets.keys().all(|t| settled.contains(t)))
            .map(|(node, _)| node.clone())
            .collect();

        if next.is_empty() {
            break;
        }
        debug!("Layer {}: {} node(s)", layers.len(), next.len());
        settled.extend(next.iter().cloned());
        layers.push(next);
    }

    let unresolved: BTreeSet<PackageName> = graph
        .nodes()
        .filter(|n| !settled.contains(*n))
        .cloned()
        .collect();

    let offending = unresolved
        .iter()
        .map(|package| OffendingEdges {
            package: package.clone(),
            edges: graph
                .targets(package)
                .into_iter()
                .flatten()
                .filter(|(to, _)| !settled.contains(*to))
                .map(|(to, weight)| PackageEdge::new(package.clone(), to.clone(), *weight))
                .collect(),
        })
        .collect();

    let total = settled.len() + unresolved.len();
    let percentage = if total == 0 {
        100
    } else {
        // settled <= total, so the quotient is at most 100
        u8::try_from(settled.len() * 100 / total).unwrap_or(100)
    };

    StratificationResult {
        cycles: cycle_groups(graph, &unresolved),
        layers,
        unresolved,
        percentage,
        offending,
    }
}

/// Strongly connected components of the unresolved subgraph with more than one member.
fn cycle_groups(graph: &DependencyGraph, unresolved: &BTreeSet<PackageName>) -> Vec<Vec<PackageName>> {
    if unresolved.is_empty() {
        return Vec::new();
    }

    let mut sub: DiGraph<&str, ()> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    for node in unresolved {
        index.insert(node.as_str(), sub.add_node(node.as_str()));
    }
    for node in unresolved {
        for to in graph.targets(node).into_iter().flat_map(BTreeMap::keys) {
            if let (Some(&a), Some(&b)) = (index.get(node.as_str()), index.get(to.as_str())) {
                sub.add_edge(a, b, ());
            }
        }
    }

    let mut groups: Vec<Vec<PackageName>> = tarjan_scc(&sub)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut members: Vec<PackageName> =
                scc.into_iter().map(|i| sub[i].to_owned()).collect();
            members.sort();
            members
        })
        .collect();
    groups.sort();
    groups
}
