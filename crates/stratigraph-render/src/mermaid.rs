//! Mermaid flowchart renderer.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use stratigraph_core::RenderConfig;

use crate::{emit, Canvas, Layering, RenderError, Renderer};

/// Writes the package graph as a bottom-to-top Mermaid flowchart.
///
/// Links carry their weight as label and a stroke width following the
/// weight, capped at the configured maximum. Unresolved packages get the
/// `unresolved` class.
#[derive(Debug)]
pub struct MermaidRenderer {
    config: RenderConfig,
    canvas: Canvas,
}

impl MermaidRenderer {
    /// Creates a Mermaid renderer writing to `config.output` or stdout.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            canvas: Canvas::default(),
        }
    }

    /// Renders the current graph to Mermaid source.
    #[must_use]
    pub fn to_mermaid(&self) -> String {
        self.render(&Layering::of(&self.canvas.nodes))
    }

    fn render(&self, layering: &Layering<'_>) -> String {
        // Mermaid ids cannot contain dots
        let ids: BTreeMap<&str, String> = self
            .canvas
            .nodes
            .keys()
            .enumerate()
            .map(|(i, n)| (n.as_str(), format!("n{i}")))
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "---\ntitle: {}\n---", self.canvas.title.replace('\n', " "));
        out.push_str("graph BT\n");

        for (node, id) in &ids {
            let _ = writeln!(out, "  {id}[\"{}\"]", node.replace('"', "#quot;"));
        }

        let mut widths = Vec::new();
        for (from, to, weight) in self.canvas.edges() {
            if let (Some(from), Some(to)) = (ids.get(from), ids.get(to)) {
                let _ = writeln!(out, "  {from} -->|{weight}| {to}");
                widths.push(weight.min(self.config.max_weight).max(1));
            }
        }
        for (link, width) in widths.iter().enumerate() {
            let _ = writeln!(out, "  linkStyle {link} stroke-width:{width}px");
        }

        let marked: Vec<&str> = layering
            .unresolved
            .iter()
            .filter_map(|n| ids.get(n).map(String::as_str))
            .collect();
        if !marked.is_empty() {
            out.push_str("  classDef unresolved fill:#f4cccc,stroke:#cc0000\n");
            let _ = writeln!(out, "  class {} unresolved", marked.join(","));
        }
        out
    }
}

impl Renderer for MermaidRenderer {
    fn name(&self) -> &'static str {
        "mermaid"
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
        Ok(())
    }

    fn completed(&self) -> Option<bool> {
        self.canvas.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratigraph_core::RendererKind;

    fn targets(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(t, w)| ((*t).to_string(), *w)).collect()
    }

    #[test]
    fn flowchart_with_weight_labels() {
        let mut r = MermaidRenderer::new(RenderConfig::default());
        r.init("shop");
        r.add_node("com.shop.web", &targets(&[("com.shop.model", 3)]));

        insta::assert_snapshot!(r.to_mermaid(), @r#"
        ---
        title: shop
        ---
        graph BT
          n0["com.shop.model"]
          n1["com.shop.web"]
          n1 -->|3| n0
          linkStyle 0 stroke-width:3px
        "#);
    }

    #[test]
    fn link_width_is_capped() {
        let mut r = MermaidRenderer::new(RenderConfig {
            kind: RendererKind::Mermaid,
            output: None,
            max_weight: 4,
        });
        r.init("heavy");
        r.add_node("a", &targets(&[("b", 17), ("c", 2)]));

        let text = r.to_mermaid();
        assert!(text.contains("n0 -->|17| n1"));
        assert!(text.contains("linkStyle 0 stroke-width:4px"));
        assert!(text.contains("linkStyle 1 stroke-width:2px"));
    }

    #[test]
    fn unresolved_nodes_get_class() {
        let mut r = MermaidRenderer::new(RenderConfig {
            kind: RendererKind::Mermaid,
            ..RenderConfig::default()
        });
        r.init("loop");
        r.add_node("a", &targets(&[("b", 1)]));
        r.add_node("b", &targets(&[("a", 1)]));
        r.add_node("c", &targets(&[]));

        let text = r.to_mermaid();
        assert!(text.contains("class n0,n1 unresolved"));
    }

    #[test]
    fn finish_writes_file_and_completion() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("graph.mmd");
        let mut r = MermaidRenderer::new(RenderConfig {
            kind: RendererKind::Mermaid,
            output: Some(out.clone()),
            max_weight: 9,
        });
        r.init("loop");
        r.add_node("a", &targets(&[("b", 1)]));
        r.add_node("b", &targets(&[("a", 1)]));
        r.finish().unwrap();

        assert_eq!(r.completed(), Some(false));
        assert!(std::fs::read_to_string(out).unwrap().contains("graph BT"));
    }
}
