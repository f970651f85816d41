//! Shared output formatting for layering reports.

use anyhow::Result;
use std::io::IsTerminal;
use stratigraph_core::Report;

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    print!("{}", report.render_text());
    println!("{}", verdict_line(report, std::io::stdout().is_terminal()));
}

/// Final verdict line, coloured only for a terminal.
fn verdict_line(report: &Report, color: bool) -> String {
    let (code, text) = if report.verdict() {
        ("\x1b[32m", "Layered".to_string())
    } else {
        (
            "\x1b[31m",
            format!(
                "Not layered: {} package(s) unresolved",
                report.total - report.settled
            ),
        )
    };
    if color {
        format!("{code}{text}\x1b[0m")
    } else {
        text
    }
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &Report) {
    print!("{}", report.render_compact());
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratigraph_core::{stratify, DependencyGraph, PackageEdge};

    fn cyclic_report() -> Report {
        let mut g = DependencyGraph::new();
        g.add_edge(PackageEdge::new("a", "b", 1));
        g.add_edge(PackageEdge::new("b", "a", 1));
        Report::new(&stratify(&g))
    }

    #[test]
    fn verdict_is_plain_without_terminal() {
        let line = verdict_line(&cyclic_report(), false);
        assert_eq!(line, "Not layered: 2 package(s) unresolved");
        assert!(!line.contains('\x1b'));
    }

    #[test]
    fn verdict_is_coloured_for_terminal() {
        let report = Report::new(&stratify(&DependencyGraph::new()));
        assert_eq!(verdict_line(&report, true), "\x1b[32mLayered\x1b[0m");
    }
}
