//! # stratigraph-java
//!
//! Lightweight source collector for stratigraph.
//!
//! Builds the class-level [`ImportIndex`](stratigraph_core::ImportIndex)
//! by scanning source files line by line. No syntax tree is built; only
//! lines starting with the declaration or import keyword are looked at.
//!
//! - [`SourceExtractor`] trait for pluggable line recognition
//! - [`JavaExtractor`] for Java `package`/`import` lines
//! - [`SourceCollector`] for directory walking and index construction

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collector;
pub mod extractor;
pub mod java;

pub use collector::{ScanError, ScanOutcome, ScanStats, SourceCollector, SOURCE_DIR};
pub use extractor::{scan_source, FileScan, SourceExtractor, SourceLine};
pub use java::JavaExtractor;
