//! Language-agnostic line scanning types and trait.
//!
//! `SourceExtractor` is the extension point for adding new languages.
//! Implement it to teach the collector how to recognise declaration and
//! import lines and where the language keeps its sources.

use std::io::{self, BufRead};

use stratigraph_core::{ClassName, IgnoreSet, ImportIndex};

/// What a single source line means to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLine {
    /// Package declaration with the declared package name.
    Declaration(String),
    /// Import statement with the imported identifier.
    Import(String),
    /// Anything else.
    Other,
}

/// Trait for language-specific line recognition.
///
/// The scanner is textual: one line at a time, no syntax
/// tree. Statements spanning lines or keywords inside comments are not
/// handled.
pub trait SourceExtractor: Send + Sync {
    /// Language identifier (e.g., `"java"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&["java"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Path below a `src` directory that replaces it as source root when it
    /// exists (e.g., `main/java`).
    fn nested_source_root(&self) -> &'static str;

    /// Classify one line of source text.
    fn classify(&self, line: &str) -> SourceLine;
}

/// Result of scanning one source file.
#[derive(Debug, Default)]
pub struct FileScan {
    /// Imports of the classes declared in this file.
    ///
    /// A class gets an entry at its first import line, even when the ignore
    /// set drops that import. Classes without imports have no entry.
    pub index: ImportIndex,
    /// Classes named by declaration lines, with or without imports.
    pub declared: Vec<ClassName>,
    /// 1-indexed lines holding an import before any declaration.
    pub context_errors: Vec<usize>,
    /// Number of imports dropped by the ignore set.
    pub ignored: usize,
}

/// Scans one file's lines into a [`FileScan`].
///
/// A declaration line sets the declaring class to `<package>.<file_stem>`.
/// Imports seen before any declaration are recorded as context errors and
/// discarded. On a read error the partial scan is dropped.
///
/// # Errors
///
/// Returns the underlying I/O error if reading fails.
pub fn scan_source<R: BufRead>(
    extractor: &dyn SourceExtractor,
    file_stem: &str,
    reader: R,
    ignore: &IgnoreSet,
) -> io::Result<FileScan> {
    let mut scan = FileScan::default();
    let mut current: Option<ClassName> = None;

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let text = String::from_utf8_lossy(&bytes);
        let line = text.trim_end_matches('\r');

        match extractor.classify(line) {
            SourceLine::Declaration(package) => {
                let class = format!("{package}.{file_stem}");
                scan.declared.push(class.clone());
                current = Some(class);
            }
            SourceLine::Import(identifier) => match &current {
                None => scan.context_errors.push(idx + 1),
                Some(class) => {
                    scan.index.declare(class.clone());
                    if ignore.matches_identifier(&identifier) {
                        scan.ignored += 1;
                    } else {
                        scan.index.add_import(class.clone(), identifier);
                    }
                }
            },
            SourceLine::Other => {}
        }
    }

    Ok(scan)
}
