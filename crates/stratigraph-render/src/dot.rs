//! Graphviz DOT renderer.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use stratigraph_core::RenderConfig;

use crate::{emit, Canvas, Layering, RenderError, Renderer};

/// Writes the package graph as a Graphviz digraph.
///
/// Settled packages share a `rank=same` subgraph per layer, lowest layer
/// at the bottom. Unresolved packages are filled red. Edge pen width
/// follows the edge weight, capped at the configured maximum.
#[derive(Debug)]
pub struct DotRenderer {
    config: RenderConfig,
    canvas: Canvas,
}

impl DotRenderer {
    /// Creates a DOT renderer writing to `config.output` or stdout.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            canvas: Canvas::default(),
        }
    }

    /// Renders the current graph to a DOT document.
    #[must_use]
    pub fn to_dot(&self) -> String {
        self.render(&Layering::of(&self.canvas.nodes))
    }

    fn render(&self, layering: &Layering<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph {} {{", quote(&self.canvas.title));
        out.push_str("  rankdir=BT;\n");
        out.push_str("  node [shape=box, fontname=\"Helvetica\"];\n");

        for (level, members) in layering.layers.iter().enumerate() {
            let _ = writeln!(out, "  subgraph layer_{level} {{");
            out.push_str("    rank=same;\n");
            for m in members {
                let _ = writeln!(out, "    {};", quote(m));
            }
            out.push_str("  }\n");
        }

        for node in &layering.unresolved {
            let _ = writeln!(
                out,
                "  {} [style=filled, fillcolor=\"#f4cccc\", color=red];",
                quote(node)
            );
        }

        for (from, to, weight) in self.canvas.edges() {
            let width = weight.min(self.config.max_weight).max(1);
            let _ = writeln!(
                out,
                "  {} -> {} [label=\"{weight}\", penwidth={width}];",
                quote(from),
                quote(to),
            );
        }

        out.push_str("}\n");
        out
    }
}

impl Renderer for DotRenderer {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn init(&mut self, title: &str) {
        self.canvas.init(title);
    }

    fn add_node(&mut self, package: &str, targets: &BTreeMap<String, u32>) {
        self.canvas.add_node(package, targets);
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let layering = Layering::of(&self.canvas.nodes);
        let complete = layering.is_complete();
        emit(self.config.output.as_ref(), &self.render(&layering))?;
        self.canvas.completed = Some(complete);
        tracing::debug!("DOT graph with {} node(s) written", self.canvas.nodes.len());
        Ok(())
    }

    fn completed(&self) -> Option<bool> {
        self.canvas.completed
    }
}

/// Quotes a DOT identifier.
fn quote(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    for c in id.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
