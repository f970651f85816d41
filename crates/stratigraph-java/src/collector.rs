//! Directory walking and import index construction.
//!
//! The base directory is searched for directories named `src`. Each one
//! becomes a source root, or its nested conventional path (`src/main/java`
//! for Java) when that exists. Every other directory is recursed into.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use stratigraph_core::{IgnoreSet, ImportIndex};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::extractor::{scan_source, FileScan, SourceExtractor};

/// Directory name marking a source tree.
pub const SOURCE_DIR: &str = "src";

/// Errors that abort a scan.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ScanError {
    /// The base directory cannot be read.
    #[error("Cannot read base directory {path}: {source}")]
    #[diagnostic(code(stratigraph::scan::base_dir))]
    BaseDir {
        /// Base directory.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The base directory is not a directory.
    #[error("Not a directory: {0}")]
    #[diagnostic(code(stratigraph::scan::not_a_directory))]
    NotADirectory(PathBuf),

    /// Invalid exclude pattern.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(stratigraph::scan::glob))]
    Glob(#[from] glob::PatternError),
}

/// Counters gathered during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Source roots found below the base directory.
    pub source_roots: usize,
    /// Files scanned successfully.
    pub files_scanned: usize,
    /// Files skipped because they could not be read.
    pub files_skipped: usize,
    /// Files skipped by exclude patterns.
    pub files_excluded: usize,
    /// Import lines seen before any declaration.
    pub context_errors: usize,
    /// Imports dropped by the ignore set.
    pub ignored_imports: usize,
}

/// Import index plus scan statistics.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Class-level import index.
    pub index: ImportIndex,
    /// Scan counters.
    pub stats: ScanStats,
}

/// Walks a directory tree and builds an [`ImportIndex`].
pub struct SourceCollector {
    extractor: Box<dyn SourceExtractor>,
    ignore: IgnoreSet,
    exclude: Vec<glob::Pattern>,
    declared_classes: bool,
}

impl SourceCollector {
    /// Creates a collector for one language.
    #[must_use]
    pub fn new(extractor: Box<dyn SourceExtractor>, ignore: IgnoreSet) -> Self {
        Self {
            extractor,
            ignore,
            exclude: Vec::new(),
            declared_classes: false,
        }
    }

    /// Also index classes that have no import lines.
    ///
    /// Off by default: a class enters the index at its first import line.
    /// When on, every declared class gets an entry, so import-free packages
    /// become graph nodes and count as internal.
    #[must_use]
    pub fn with_declared_classes(mut self, enabled: bool) -> Self {
        self.declared_classes = enabled;
        self
    }

    /// Adds glob patterns for source files to skip.
    ///
    /// Patterns match the path relative to the base directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Glob`] for an invalid pattern.
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.exclude.push(glob::Pattern::new(pattern.as_ref())?);
        }
        Ok(self)
    }

    /// Finds the source roots below `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a readable directory.
    pub fn source_roots(&self, base: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let meta = std::fs::metadata(base).map_err(|e| ScanError::BaseDir {
            path: base.to_path_buf(),
            source: e,
        })?;
        if !meta.is_dir() {
            return Err(ScanError::NotADirectory(base.to_path_buf()));
        }
        std::fs::read_dir(base).map_err(|e| ScanError::BaseDir {
            path: base.to_path_buf(),
            source: e,
        })?;

        let mut roots = Vec::new();
        let mut walker = WalkDir::new(base)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() || entry.file_name() != SOURCE_DIR {
                continue;
            }

            let nested = entry.path().join(self.extractor.nested_source_root());
            let root = if nested.is_dir() {
                nested
            } else {
                entry.path().to_path_buf()
            };
            debug!("Source root {}", root.display());
            roots.push(root);
            walker.skip_current_dir();
        }

        Ok(roots)
    }

    /// Scans every source file below `base`.
    ///
    /// Unreadable files are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if `base` itself cannot be read.
    pub fn collect(&self, base: &Path) -> Result<ScanOutcome, ScanError> {
        info!("Scanning {} sources below {}", self.extractor.language_id(), base.display());

        let roots = self.source_roots(base)?;
        let mut outcome = ScanOutcome::default();
        outcome.stats.source_roots = roots.len();

        for root in &roots {
            self.collect_root(base, root, &mut outcome);
        }

        info!(
            "Scanned {} file(s) in {} source root(s): {} classes, {} imports ({} skipped, {} context errors)",
            outcome.stats.files_scanned,
            outcome.stats.source_roots,
            outcome.index.len(),
            outcome.index.import_count(),
            outcome.stats.files_skipped,
            outcome.stats.context_errors,
        );
        Ok(outcome)
    }

    fn collect_root(&self, base: &Path, root: &Path, outcome: &mut ScanOutcome) {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_source_file(path) {
                continue;
            }
            if self.is_excluded(base, path) {
                debug!("Excluding: {}", path.display());
                outcome.stats.files_excluded += 1;
                continue;
            }

            self.record(path, self.scan_file(path), outcome);
        }
    }

    /// Merges one file's scan into the outcome, or counts it as skipped.
    fn record(&self, path: &Path, scan: std::io::Result<FileScan>, outcome: &mut ScanOutcome) {
        match scan {
            Ok(scan) => {
                for line in &scan.context_errors {
                    error!("Import for unidentified context at {}:{}", path.display(), line);
                }
                outcome.stats.context_errors += scan.context_errors.len();
                outcome.stats.ignored_imports += scan.ignored;
                outcome.stats.files_scanned += 1;
                if self.declared_classes {
                    for class in scan.declared {
                        outcome.index.declare(class);
                    }
                }
                outcome.index.merge(scan.index);
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                outcome.stats.files_skipped += 1;
            }
        }
    }

    fn scan_file(&self, path: &Path) -> std::io::Result<FileScan> {
        debug!("Reading {}", path.display());
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path)?;
        scan_source(self.extractor.as_ref(), &stem, BufReader::new(file), &self.ignore)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extractor.extensions().contains(&ext))
    }

    fn is_excluded(&self, base: &Path, path: &Path) -> bool {
        let rel = path.strip_prefix(base).unwrap_or(path);
        self.exclude.iter().any(|p| p.matches_path(rel))
    }
}
