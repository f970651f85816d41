//! Formatting of stratification results and the success verdict.

use serde::Serialize;
use std::fmt::Write;
use tracing::{info, warn};

use crate::stratify::{OffendingEdges, StratificationResult};
use crate::types::PackageName;

/// Printable view of a [`StratificationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Layer members in layer order, each sorted by name.
    pub layers: Vec<Vec<PackageName>>,
    /// Offending edges per unresolved node, sorted by node.
    pub offending: Vec<OffendingEdges>,
    /// Cycle groups among unresolved nodes.
    pub cycles: Vec<Vec<PackageName>>,
    /// Number of layered nodes.
    pub settled: usize,
    /// Number of nodes.
    pub total: usize,
    /// Completion percentage.
    pub percentage: u8,
}

impl Report {
    /// Creates the report for a result.
    #[must_use]
    pub fn new(result: &StratificationResult) -> Self {
        Self {
            layers: result
                .layers
                .iter()
                .map(|l| l.iter().cloned().collect())
                .collect(),
            offending: result.offending.clone(),
            cycles: result.cycles.clone(),
            settled: result.settled_count(),
            total: result.total_count(),
            percentage: result.percentage,
        }
    }

    /// `true` if the sources are completely layered.
    #[must_use]
    pub fn verdict(&self) -> bool {
        self.percentage >= 100
    }

    /// One-line summary, e.g. `5 of 7 packages layered (71%)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} of {} packages layered ({}%)",
            self.settled, self.total, self.percentage
        )
    }

    /// Emits the report through `tracing`.
    pub fn log(&self) {
        for (level, members) in self.layers.iter().enumerate() {
            info!(layer = level, "Layer {}: {}", level, members.join(", "));
        }
        for entry in &self.offending {
            for edge in &entry.edges {
                warn!(from = %edge.from, to = %edge.to, weight = edge.weight, "Offending edge {}", edge);
            }
        }
        for group in &self.cycles {
            warn!("Cycle: {}", group.join(" <-> "));
        }
        info!("{}", self.summary());
    }

    /// Multi-line plain-text rendering.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for (level, members) in self.layers.iter().enumerate() {
            let _ = writeln!(out, "Layer {level}:");
            for m in members {
                let _ = writeln!(out, "  {m}");
            }
        }

        if self.offending.is_empty() {
            let _ = writeln!(out, "\nAll packages are layered.");
        } else {
            let _ = writeln!(out, "\nOffending packages:");
            for entry in &self.offending {
                for edge in &entry.edges {
                    let _ = writeln!(out, "  {edge}");
                }
            }
        }

        if !self.cycles.is_empty() {
            let _ = writeln!(out, "\nCycles:");
            for group in &self.cycles {
                let _ = writeln!(out, "  {}", group.join(" <-> "));
            }
        }

        let _ = writeln!(out, "\n{}", self.summary());
        out
    }

    /// One line per offending edge: `from -> to (weight)`.
    #[must_use]
    pub fn render_compact(&self) -> String {
        let mut out = String::new();
        for entry in &self.offending {
            for edge in &entry.edges {
                let _ = writeln!(out, "{edge}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyGraph;
    use crate::stratify::stratify;
    use crate::types::PackageEdge;

    fn report(edges: &[(&str, &str, u32)]) -> Report {
        let mut g = DependencyGraph::new();
        for (from, to, w) in edges {
            g.add_edge(PackageEdge::new(*from, *to, *w));
        }
        Report::new(&stratify(&g))
    }

    #[test]
    fn verdict_true_when_layered() {
        let r = report(&[("app", "model", 2)]);
        assert!(r.verdict());
        assert_eq!(r.summary(), "2 of 2 packages layered (100%)");
    }

    #[test]
    fn verdict_false_with_cycle() {
        let r = report(&[("a", "b", 1), ("b", "a", 1)]);
        assert!(!r.verdict());
        assert_eq!(r.percentage, 0);
    }

    #[test]
    fn text_rendering_layered() {
        let r = report(&[("app", "model", 2), ("app", "util", 1), ("model", "util", 4)]);
        insta::assert_snapshot!(r.render_text(), @r"
        Layer 0:
          util
        Layer 1:
          model
        Layer 2:
          app

        All packages are layered.

        3 of 3 packages layered (100%)
        ");
    }

    #[test]
    fn text_rendering_with_cycle() {
        let r = report(&[("a", "b", 3), ("b", "a", 1), ("a", "base", 2)]);
        insta::assert_snapshot!(r.render_text(), @r"
        Layer 0:
          base

        Offending packages:
          a -> b (3)
          b -> a (1)

        Cycles:
          a <-> b

        1 of 3 packages layered (33%)
        ");
    }

    #[test]
    fn compact_lists_only_offending_edges() {
        let r = report(&[("a", "b", 3), ("b", "a", 1), ("a", "base", 2)]);
        assert_eq!(r.render_compact(), "a -> b (3)\nb -> a (1)\n");
    }

    #[test]
    fn report_serializes_to_json() {
        let r = report(&[("app", "model", 1)]);
        let json = serde_json::to_value(&r).expect("serializable");
        assert_eq!(json["percentage"], 100);
        assert_eq!(json["layers"][0][0], "model");
    }
}
