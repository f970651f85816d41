//! # stratigraph-render
//!
//! Downstream renderers for stratigraph package graphs.
//!
//! A renderer sees nothing of the analysis but the per-node map from
//! target package to edge weight. It is initialised with a title, fed
//! once per node, then finished. Its completion flag is informational;
//! the official verdict comes from [`stratigraph_core::Report`].
//!
//! - [`HeadlessRenderer`] draws nothing
//! - [`DotRenderer`] writes Graphviz DOT
//! - [`MermaidRenderer`] writes a Mermaid flowchart

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dot;
mod headless;
mod mermaid;

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::PathBuf;

use stratigraph_core::{RenderConfig, RendererKind};

pub use dot::DotRenderer;
pub use headless::HeadlessRenderer;
pub use mermaid::MermaidRenderer;

/// Errors raised while producing renderer output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RenderError {
    /// Writing the output failed.
    #[error("Failed to write graph to {target}: {source}")]
    #[diagnostic(code(stratigraph::render::io))]
    Io {
        /// Output file or `stdout`.
        target: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Capability interface for graph renderers.
pub trait Renderer {
    /// Short identifier (e.g., `"dot"`).
    fn name(&self) -> &'static str;

    /// Starts a new graph with a human-readable title.
    fn init(&mut self, title: &str);

    /// Registers a node and its outgoing edges (target → weight).
    fn add_node(&mut self, package: &str, targets: &BTreeMap<String, u32>);

    /// Finalises and emits the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn finish(&mut self) -> Result<(), RenderError>;

    /// Whether the rendered graph was completely layered, once known.
    fn completed(&self) -> Option<bool>;
}

/// Creates the renderer selected by `config`.
#[must_use]
pub fn renderer_for(config: &RenderConfig) -> Box<dyn Renderer> {
    match config.kind {
        RendererKind::None => Box::new(HeadlessRenderer::new()),
        RendererKind::Dot => Box::new(DotRenderer::new(config.clone())),
        RendererKind::Mermaid => Box::new(MermaidRenderer::new(config.clone())),
    }
}

/// Feeds every `(node, targets)` pair into `renderer` and finishes it.
///
/// # Errors
///
/// Propagates the renderer's output error.
pub fn render_graph<'a, I>(renderer: &mut dyn Renderer, title: &str, nodes: I) -> Result<(), RenderError>
where
    I: IntoIterator<Item = (&'a String, &'a BTreeMap<String, u32>)>,
{
    renderer.init(title);
    for (package, targets) in nodes {
        renderer.add_node(package, targets);
    }
    renderer.finish()
}

/// Graph state shared by the text renderers: node → (target → weight).
#[derive(Debug, Default)]
struct Canvas {
    title: String,
    nodes: BTreeMap<String, BTreeMap<String, u32>>,
    completed: Option<bool>,
}

impl Canvas {
    fn init(&mut self, title: &str) {
        self.title = title.to_owned();
        self.nodes.clear();
        self.completed = None;
    }

    fn add_node(&mut self, package: &str, targets: &BTreeMap<String, u32>) {
        for to in targets.keys() {
            self.nodes.entry(to.clone()).or_default();
        }
        self.nodes
            .entry(package.to_owned())
            .or_default()
            .extend(targets.iter().map(|(t, w)| (t.clone(), *w)));
    }

    /// Edges as `(from, to, weight)` in node order.
    fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.nodes.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(to, w)| (from.as_str(), to.as_str(), *w))
        })
    }
}

/// Writes rendered text to the configured file or stdout.
fn emit(output: Option<&PathBuf>, text: &str) -> Result<(), RenderError> {
    match output {
        Some(path) => std::fs::write(path, text).map_err(|e| RenderError::Io {
            target: path.display().to_string(),
            source: e,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| RenderError::Io {
                    target: "stdout".to_string(),
                    source: e,
                })
        }
    }
}

/// Layer assignment used for styling.
#[derive(Debug, Default)]
struct Layering<'a> {
    /// Members per layer, lowest first.
    layers: Vec<BTreeSet<&'a str>>,
    /// Nodes left over once no further layer can be peeled.
    unresolved: BTreeSet<&'a str>,
}

impl<'a> Layering<'a> {
    /// Peels nodes whose targets are all placed, one layer at a time.
    fn of(nodes: &'a BTreeMap<String, BTreeMap<String, u32>>) -> Self {
        let mut placed: BTreeSet<&str> = BTreeSet::new();
        let mut layers = Vec::new();
        loop {
            let next: BTreeSet<&str> = nodes
                .iter()
                .filter(|(n, _)| !placed.contains(n.as_str()))
                .filter(|(_, t)| t.keys().all(|k| placed.contains(k.as_str())))
                .map(|(n, _)| n.as_str())
                .collect();
            if next.is_empty() {
                break;
            }
            placed.extend(next.iter().copied());
            layers.push(next);
        }
        let unresolved = nodes
            .keys()
            .map(String::as_str)
            .filter(|n| !placed.contains(n))
            .collect();
        Self { layers, unresolved }
    }

    fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}
