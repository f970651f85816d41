//! Configuration types for stratigraph.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::BuildOptions;
use crate::prefixes::{AggregationSet, IgnoreSet};

/// Top-level configuration, read from `stratigraph.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Renderer configuration.
    #[serde(default)]
    pub renderer: RenderConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, prefixes) in [
            ("ignore", &self.analyzer.ignore),
            ("aggregate", &self.analyzer.aggregate),
        ] {
            if let Some(list) = prefixes {
                if list.iter().any(|p| p.trim().is_empty()) {
                    return Err(ConfigError::Validation(format!(
                        "analyzer.{kind}: empty prefix"
                    )));
                }
            }
        }
        if self.renderer.max_weight == 0 {
            return Err(ConfigError::Validation(
                "renderer.max_weight must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns of source files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Count only relations between packages of the scanned sources.
    #[serde(default)]
    pub only_internal: bool,

    /// Do not signal failure when the sources are not fully layered.
    #[serde(default)]
    pub no_error: bool,

    /// Index classes without import lines as well. Off by default, in
    /// which case a class only enters the index at its first import.
    #[serde(default)]
    pub declared_classes: bool,

    /// Ignore prefixes, used when no ignore side file is found.
    #[serde(default)]
    pub ignore: Option<Vec<String>>,

    /// Aggregation prefixes, used when no aggregation side file is found.
    #[serde(default)]
    pub aggregate: Option<Vec<String>>,
}

/// Which renderer receives the package graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// No rendering.
    #[default]
    None,
    /// Graphviz DOT.
    Dot,
    /// Mermaid flowchart.
    Mermaid,
}

/// Renderer settings passed explicitly to renderer construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Renderer variant.
    #[serde(default)]
    pub kind: RendererKind,

    /// Output file; stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Edge weights above this value are drawn with this width.
    #[serde(default = "default_max_weight")]
    pub max_weight: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::None,
            output: None,
            max_weight: default_max_weight(),
        }
    }
}

fn default_max_weight() -> u32 {
    9
}

/// Everything one analysis run needs, after side files and flags are merged.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    /// Prefixes dropped from the analysis.
    pub ignore: IgnoreSet,
    /// Prefixes absorbing their subpackages.
    pub aggregate: AggregationSet,
    /// Count only relations internal to the scanned sources.
    pub only_internal: bool,
    /// Index classes without import lines as well.
    pub declared_classes: bool,
    /// Glob patterns of source files to skip.
    pub exclude: Vec<String>,
}

impl AnalysisSettings {
    /// Graph builder options derived from these settings.
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            only_internal: self.only_internal,
            ignore: self.ignore.clone(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading a config or side file.
    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(stratigraph::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in the config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(stratigraph::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("Config validation: {0}")]
    #[diagnostic(code(stratigraph::config::validation))]
    Validation(String),
}
