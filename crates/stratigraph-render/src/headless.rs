//! Renderer that draws nothing.

use std::collections::BTreeMap;

use crate::{RenderError, Renderer};

/// Accepts the graph and discards it.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    nodes: usize,
}

impl HeadlessRenderer {
    /// Creates a new headless renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn init(&mut self, _title: &str) {
        self.nodes = 0;
    }

    fn add_node(&mut self, _package: &str, _targets: &BTreeMap<String, u32>) {
        self.nodes += 1;
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        tracing::debug!("Headless renderer received {} node(s)", self.nodes);
        Ok(())
    }

    fn completed(&self) -> Option<bool> {
        None
    }
}
