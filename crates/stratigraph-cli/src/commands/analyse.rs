//! Layering analysis command.
//!
//! Scans the Java sources below the base directory, builds the package
//! graph, stratifies it and reports the layers. Exits with status 1
//! when the code base is not completely layered, unless told otherwise.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use stratigraph_core::{
    read_prefix_file, stratify, AggregationSet, AnalysisSettings, Config, GraphBuilder, IgnoreSet,
    PackageResolver, RenderConfig, RendererKind, Report,
};
use stratigraph_java::{JavaExtractor, SourceCollector};
use stratigraph_render::{render_graph, renderer_for};

use crate::config_resolver::{self, ConfigSource, ListKind};
use crate::{OutputFormat, RendererArg};

/// Arguments of `stratigraph analyse`.
#[derive(clap::Args, Debug)]
pub struct AnalyseArgs {
    /// Base directory to analyse (default: current directory)
    #[arg(default_value = ".")]
    pub base_dir: PathBuf,

    /// Count only relations between packages found in the sources
    #[arg(short, long)]
    pub internal: bool,

    /// Also count packages whose classes have no import lines
    #[arg(long)]
    pub declared_classes: bool,

    /// Exit with status 0 even when not completely layered
    #[arg(short = 'e', long)]
    pub no_error: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Graph renderer (overrides the configured one)
    #[arg(short, long)]
    pub renderer: Option<RendererArg>,

    /// Renderer output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ignore list to use instead of the resolved one
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Aggregation list to use instead of the resolved one
    #[arg(long)]
    pub aggregation_file: Option<PathBuf>,

    /// Exclude source files matching a glob (can be specified multiple times)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,
}

/// Runs the analyse command.
pub fn run(args: &AnalyseArgs, config_path: Option<&Path>) -> Result<()> {
    let base = args.base_dir.as_path();
    let config = load_config(&config_resolver::resolve(base, config_path))?;

    let ignore_source =
        config_resolver::resolve_list(ListKind::Ignore, base, args.ignore_file.as_deref());
    let aggregation_source = config_resolver::resolve_list(
        ListKind::Aggregation,
        base,
        args.aggregation_file.as_deref(),
    );
    let settings = build_settings(args, &config, &ignore_source, &aggregation_source)?;
    let render_config = render_config(args, &config);
    check_render_target(args.format, &render_config)?;
    let no_error = args.no_error || config.analyzer.no_error;

    let collector = SourceCollector::new(Box::new(JavaExtractor::new()), settings.ignore.clone())
        .with_excludes(&settings.exclude)
        .context("Invalid exclude pattern")?
        .with_declared_classes(settings.declared_classes);
    let outcome = collector
        .collect(base)
        .with_context(|| format!("Failed to scan {}", base.display()))?;

    let resolver = PackageResolver::new(&settings.aggregate);
    let graph = GraphBuilder::new(&outcome.index, &resolver, settings.build_options()).build();
    let report = Report::new(&stratify(&graph));

    report.log();
    super::output::print(&report, args.format)?;

    let mut renderer = renderer_for(&render_config);
    render_graph(renderer.as_mut(), &base.display().to_string(), graph.iter())
        .context("Failed to render package graph")?;
    if let Some(completed) = renderer.completed() {
        tracing::debug!("Renderer {} completed: {}", renderer.name(), completed);
    }

    if !report.verdict() && !no_error {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source.path() {
        None => Ok(Config::default()),
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load {}", p.display()))
        }
    }
}

/// Merges side files, TOML config and flags into the analysis settings.
fn build_settings(
    args: &AnalyseArgs,
    config: &Config,
    ignore_source: &ConfigSource,
    aggregation_source: &ConfigSource,
) -> Result<AnalysisSettings> {
    let ignore = match load_list(ignore_source)? {
        Some(prefixes) => IgnoreSet::new(prefixes),
        None => config
            .analyzer
            .ignore
            .as_ref()
            .map_or_else(IgnoreSet::defaults, IgnoreSet::new),
    };

    let aggregate = match load_list(aggregation_source)? {
        Some(prefixes) => AggregationSet::new(prefixes),
        None => config
            .analyzer
            .aggregate
            .as_ref()
            .map(AggregationSet::new)
            .unwrap_or_default(),
    };

    let mut exclude = config.analyzer.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());

    tracing::debug!(
        "Ignoring {:?}, aggregating {:?}",
        ignore.prefixes(),
        aggregate.prefixes()
    );

    Ok(AnalysisSettings {
        ignore,
        aggregate,
        only_internal: args.internal || config.analyzer.only_internal,
        declared_classes: args.declared_classes || config.analyzer.declared_classes,
        exclude,
    })
}

fn load_list(source: &ConfigSource) -> Result<Option<Vec<String>>> {
    let Some(path) = source.path() else {
        return Ok(None);
    };
    tracing::debug!("Reading prefix list {}", path.display());
    let prefixes = read_prefix_file(path)
        .with_context(|| format!("Failed to load prefix list {}", path.display()))?;
    Ok(Some(prefixes))
}

/// Graph text may share stdout only with the human-readable report.
fn check_render_target(format: OutputFormat, render: &RenderConfig) -> Result<()> {
    let to_stdout = render.kind != RendererKind::None && render.output.is_none();
    if to_stdout && !matches!(format, OutputFormat::Text) {
        bail!("The {format:?} report owns stdout; pass --output for the graph renderer");
    }
    Ok(())
}

fn render_config(args: &AnalyseArgs, config: &Config) -> RenderConfig {
    let mut render = config.renderer.clone();
    if let Some(kind) = args.renderer {
        render.kind = kind.into();
    }
    if args.output.is_some() {
        render.output.clone_from(&args.output);
    }
    render
}
