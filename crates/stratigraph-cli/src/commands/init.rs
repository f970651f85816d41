//! Init command: writes default side files into a project.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use stratigraph_core::DEFAULT_IGNORES;

use crate::config_resolver::ListKind;

const IGNORE_HEADER: &str = "# stratigraph ignore list
# One package prefix per line. Imports and packages starting with a
# prefix are left out of the analysis.
";

const AGGREGATION_TEMPLATE: &str = "# stratigraph aggregation list
# One package prefix per line. Classes in subpackages of a prefix are
# counted as members of the prefix package itself.
#
# com.example.api
";

/// Runs the init command.
pub fn run(base_dir: &Path, force: bool) -> Result<()> {
    let ignore_path = base_dir.join(ListKind::Ignore.project_file());
    let aggregation_path = base_dir.join(ListKind::Aggregation.project_file());

    for path in [&ignore_path, &aggregation_path] {
        if path.exists() && !force {
            bail!(
                "Side file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }
    }

    std::fs::write(&ignore_path, ignore_template())
        .with_context(|| format!("Failed to write {}", ignore_path.display()))?;
    std::fs::write(&aggregation_path, AGGREGATION_TEMPLATE)
        .with_context(|| format!("Failed to write {}", aggregation_path.display()))?;

    println!("Created {}", ignore_path.display());
    println!("Created {}", aggregation_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Add third-party prefixes to the ignore list");
    println!("  2. Add prefixes to aggregate to the aggregation list");
    println!("  3. Run: stratigraph analyse {}", base_dir.display());

    Ok(())
}

fn ignore_template() -> String {
    let mut out = IGNORE_HEADER.to_string();
    for prefix in DEFAULT_IGNORES {
        let _ = writeln!(out, "{prefix}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stratigraph_core::{parse_prefix_lines, IgnoreSet};
    use tempfile::TempDir;

    #[test]
    fn writes_both_lists() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), false).unwrap();

        let ignore = fs::read_to_string(tmp.path().join(".stratigraph.ignore.list")).unwrap();
        assert_eq!(
            IgnoreSet::new(parse_prefix_lines(&ignore)),
            IgnoreSet::defaults()
        );

        let aggregation =
            fs::read_to_string(tmp.path().join(".stratigraph.aggregation.list")).unwrap();
        assert!(parse_prefix_lines(&aggregation).is_empty());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join(".stratigraph.aggregation.list");
        fs::write(&existing, "com.mine\n").unwrap();

        assert!(run(tmp.path(), false).is_err());
        assert_eq!(fs::read_to_string(&existing).unwrap(), "com.mine\n");
        assert!(!tmp.path().join(".stratigraph.ignore.list").exists());

        run(tmp.path(), true).unwrap();
        assert_ne!(fs::read_to_string(&existing).unwrap(), "com.mine\n");
    }
}
