//! stratigraph CLI tool.
//!
//! Usage:
//! ```bash
//! stratigraph analyse [OPTIONS] [BASEDIR]
//! stratigraph init [--force] [BASEDIR]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stratigraph_core::RendererKind;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks whether the packages of a Java code base form a layered architecture
#[derive(Parser)]
#[command(name = "stratigraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse the package layering of a source tree
    Analyse(commands::analyse::AnalyseArgs),

    /// Write default ignore and aggregation lists
    Init {
        /// Overwrite existing lists
        #[arg(long)]
        force: bool,

        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        base_dir: PathBuf,
    },
}

/// Output format for the layering report.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One offending edge per line.
    Compact,
}

/// Renderer selection on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RendererArg {
    /// No graph output.
    None,
    /// Graphviz DOT.
    Dot,
    /// Mermaid flowchart.
    Mermaid,
}

impl From<RendererArg> for RendererKind {
    fn from(arg: RendererArg) -> Self {
        match arg {
            RendererArg::None => Self::None,
            RendererArg::Dot => Self::Dot,
            RendererArg::Mermaid => Self::Mermaid,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyse(args) => commands::analyse::run(&args, cli.config.as_deref()),
        Commands::Init { force, base_dir } => commands::init::run(&base_dir, force),
    }
}
