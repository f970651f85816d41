//! Configuration and side-file resolution with global fallback.
//!
//! Both the TOML configuration and the two prefix lists are resolved
//! using the same deterministic priority order:
//!
//! 1. Explicit path from a command-line flag
//! 2. File in the analysed base directory
//! 3. File in the global config directory (`~/.stratigraph/`)
//! 4. Nothing found → config values or built-in defaults

use std::path::{Path, PathBuf};

/// Where a file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified on the command line.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No file found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the file was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// The two plain-text prefix lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Prefixes dropped from the analysis.
    Ignore,
    /// Prefixes absorbing their subpackages.
    Aggregation,
}

impl ListKind {
    /// File name inside a project directory.
    #[must_use]
    pub fn project_file(self) -> &'static str {
        match self {
            Self::Ignore => ".stratigraph.ignore.list",
            Self::Aggregation => ".stratigraph.aggregation.list",
        }
    }

    /// File name inside the global config directory.
    #[must_use]
    pub fn global_file(self) -> &'static str {
        match self {
            Self::Ignore => "ignore.list",
            Self::Aggregation => "aggregation.list",
        }
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["stratigraph.toml", ".stratigraph.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the TOML configuration file.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(
        project_dir,
        explicit,
        PROJECT_CONFIG_NAMES,
        GLOBAL_CONFIG_NAME,
        global_config_dir(),
    )
}

/// Resolves one of the prefix lists.
#[must_use]
pub fn resolve_list(kind: ListKind, project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(
        project_dir,
        explicit,
        &[kind.project_file()],
        kind.global_file(),
        global_config_dir(),
    )
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    project_names: &[&str],
    global_name: &str,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in project_names {
        let candidate = project_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project file: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(global_name);
        if candidate.is_file() {
            tracing::debug!("Found global file: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$STRATIGRAPH_CONFIG_DIR` > `~/.stratigraph/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("STRATIGRAPH_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".stratigraph"))
}
