//! # stratigraph-core
//!
//! Package dependency analysis and layer stratification.
//!
//! This crate turns a class-level import index into a weighted package
//! graph and decides whether that graph can be split into dependency
//! layers. It includes:
//!
//! - [`ImportIndex`] for the class-level imports of one scan
//! - [`PackageResolver`] for class-to-package mapping with aggregation
//! - [`GraphBuilder`] for reducing imports into a [`DependencyGraph`]
//! - [`stratify`] for the layer assignment and cycle detection
//! - [`Report`] for formatting results and the success verdict
//!
//! ## Example
//!
//! ```
//! use stratigraph_core::{
//!     stratify, AggregationSet, BuildOptions, GraphBuilder, ImportIndex, PackageResolver, Report,
//! };
//!
//! let mut index = ImportIndex::new();
//! index.add_import("com.acme.app.Main", "com.acme.model.User");
//! index.declare("com.acme.model.User");
//!
//! let resolver = PackageResolver::new(&AggregationSet::default());
//! let graph = GraphBuilder::new(&index, &resolver, BuildOptions::default()).build();
//! let report = Report::new(&stratify(&graph));
//! assert!(report.verdict());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod graph;
mod prefixes;
mod report;
mod resolver;
mod stratify;
mod types;

pub use config::{AnalysisSettings, AnalyzerConfig, Config, ConfigError, RenderConfig, RendererKind};
pub use graph::{BuildOptions, DependencyGraph, GraphBuilder};
pub use prefixes::{
    parse_prefix_lines, read_prefix_file, AggregationSet, IgnoreSet, DEFAULT_IGNORES,
};
pub use report::Report;
pub use resolver::PackageResolver;
pub use stratify::{stratify, OffendingEdges, StratificationResult};
pub use types::{ClassName, ImportIndex, PackageEdge, PackageName};
