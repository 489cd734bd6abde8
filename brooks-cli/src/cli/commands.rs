//! Command implementations and argument parsing for the brooks CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use brooks_core::{
    BatchRunner, BatchRunnerBuilder, BatchSummary, BrooksError, ExceptionClass, GraphModel,
    ModelParams, NoSnapshots, RealizationOutcome, SnapshotRenderer, TheoremCheck, Verdict,
    complete_graph, cycle_graph, evaluate, gnp_random_graph, greedy_largest_first,
};
use brooks_render::{ImageFormat, Layout, RenderConfig, RenderError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_NODES: usize = 50;
const DEFAULT_REALIZATIONS: usize = 50;
const DEFAULT_STRIDE: usize = 10;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_NEIGHBOURS: usize = 4;
const DEFAULT_REWIRE_PROBABILITY: f64 = 0.3;
const DEFAULT_ATTACHMENTS: usize = 2;
const DEFAULT_OUTPUT_DIR: &str = "output_graphs";
const DEFAULT_CHECK_NODES: usize = 8;
const DEFAULT_EDGE_PROBABILITY: f64 = 0.4;
const SEPARATOR_WIDTH: usize = 50;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "brooks",
    about = "Check Brooks' theorem against greedy colourings of random graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one batch of realizations per model and report the statistics.
    Run(RunCommand),
    /// Build one named graph, colour it, and report its Brooks verdict.
    Check(CheckCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Generator model to run (`watts` or `barabasi`); repeat for several
    /// batches. Runs `watts` then `barabasi` when omitted.
    #[arg(long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// Nodes per realization.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Realizations per batch.
    #[arg(long, default_value_t = DEFAULT_REALIZATIONS)]
    pub realizations: usize,

    /// Seed of the random source; every batch restarts from it.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Render every `stride`-th realization.
    #[arg(long, default_value_t = DEFAULT_STRIDE)]
    pub stride: usize,

    /// Ring-lattice neighbours of the small-world model.
    #[arg(long, default_value_t = DEFAULT_NEIGHBOURS)]
    pub neighbours: usize,

    /// Rewiring probability of the small-world model.
    #[arg(long = "rewire-probability", default_value_t = DEFAULT_REWIRE_PROBABILITY)]
    pub rewire_probability: f64,

    /// Edges attached by each new node of the scale-free model.
    #[arg(long, default_value_t = DEFAULT_ATTACHMENTS)]
    pub attachments: usize,

    /// Directory receiving `<model>/<model>_<index>` snapshots.
    #[arg(long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Skip snapshot rendering.
    #[arg(long = "no-render")]
    pub no_render: bool,

    /// Snapshot image format.
    #[arg(long, value_enum, default_value_t = SnapshotFormat::Svg)]
    pub format: SnapshotFormat,

    /// Node placement used in snapshots.
    #[arg(long, value_enum, default_value_t = SnapshotLayout::Spring)]
    pub layout: SnapshotLayout,

    /// Also ask for snapshots to be shown interactively.
    #[arg(long)]
    pub display: bool,

    /// Summary encoding written to stdout.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Human)]
    pub summary: SummaryFormat,

    /// Report every realization before each batch summary.
    #[arg(long)]
    pub verbose: bool,
}

/// Options accepted by the `check` command.
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Graph family to build.
    #[arg(long, value_enum, default_value_t = NamedGraph::Gnp)]
    pub graph: NamedGraph,

    /// Node count of the graph.
    #[arg(long, default_value_t = DEFAULT_CHECK_NODES)]
    pub nodes: usize,

    /// Edge probability of `gnp`; ignored by the other families.
    #[arg(long, default_value_t = DEFAULT_EDGE_PROBABILITY)]
    pub probability: f64,

    /// Seed of the random source used by `gnp`.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Report encoding written to stdout.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Human)]
    pub summary: SummaryFormat,
}

/// Graph families accepted by `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedGraph {
    /// Complete graph `K_n`.
    Complete,
    /// Cycle `C_n`.
    Cycle,
    /// Erdős–Rényi `G(n, p)`.
    Gnp,
}

impl NamedGraph {
    const fn label(self) -> &'static str {
        match self {
            Self::Complete => "COMPLETE",
            Self::Cycle => "CYCLE",
            Self::Gnp => "GNP",
        }
    }
}

/// Snapshot image formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    /// Raster PNG with nodes and edges only.
    Png,
    /// Vector SVG with node labels and title.
    Svg,
}

impl From<SnapshotFormat> for ImageFormat {
    fn from(format: SnapshotFormat) -> Self {
        match format {
            SnapshotFormat::Png => Self::Png,
            SnapshotFormat::Svg => Self::Svg,
        }
    }
}

/// Snapshot layouts selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotLayout {
    /// Seeded force-directed placement.
    Spring,
    /// Nodes on a circle.
    Circular,
}

impl From<SnapshotLayout> for Layout {
    fn from(layout: SnapshotLayout) -> Self {
        match layout {
            SnapshotLayout::Spring => Self::Spring,
            SnapshotLayout::Circular => Self::Circular,
        }
    }
}

/// Encodings of the execution summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Plain-text report.
    #[default]
    Human,
    /// Pretty-printed JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Batch configuration or execution failed.
    #[error(transparent)]
    Core(#[from] BrooksError),
    /// Renderer configuration failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CliError {
    /// Stable machine-readable code of the underlying error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Core(err) => err.code().as_str(),
            Self::Render(err) => err.code().as_str(),
        }
    }
}

/// Outcome of one batch, optionally with every realization.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Aggregated statistics.
    pub summary: BatchSummary,
    /// Per-realization results; populated with `--verbose`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<RealizationOutcome>,
}

/// Brooks check of a single named graph.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckReport {
    /// Family the graph was built from.
    pub graph: NamedGraph,
    /// Nodes in the graph.
    pub node_count: usize,
    /// Edges in the graph.
    pub edge_count: usize,
    /// Degree, colour count, exception class and verdict.
    pub check: TheoremCheck,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    /// Encoding used by [`render_summary`].
    #[serde(skip)]
    pub format: SummaryFormat,
    /// One report per batch, in execution order; empty for `check`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub batches: Vec<BatchReport>,
    /// Single-graph report written by `check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when a model name or parameter is invalid, or the
/// renderer cannot be configured.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use brooks_cli::cli::{Cli, run_cli};
/// # use clap::Parser;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from([
///     "brooks", "run", "--model", "barabasi", "--nodes", "20", "--realizations", "5", "--no-render",
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.batches.len(), 1);
/// assert_eq!(summary.batches[0].summary.realizations, 5);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
        Command::Check(check) => {
            Span::current().record("command", field::display("check"));
            check_command(&check)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(models = field::Empty, render = !command.no_render),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let models = resolve_models(&command.models)?;
    Span::current().record("models", field::debug(&models));

    let params = ModelParams::default()
        .with_neighbours(command.neighbours)
        .with_rewire_probability(command.rewire_probability)
        .with_attachments(command.attachments);
    let runner = BatchRunnerBuilder::new()
        .with_params(params)
        .with_seed(command.seed)
        .with_sample_stride(command.stride)
        .build()?;

    let batches = if command.no_render {
        run_batches(&runner, &models, &command, NoSnapshots)?
    } else {
        let renderer = render_config(&command).build()?;
        run_batches(&runner, &models, &command, renderer)?
    };

    info!(batches = batches.len(), "command completed");
    Ok(ExecutionSummary {
        format: command.summary,
        batches,
        check: None,
    })
}

#[instrument(
    name = "cli.check",
    err,
    skip(command),
    fields(graph = ?command.graph, nodes = command.nodes),
)]
pub(super) fn check_command(command: &CheckCommand) -> Result<ExecutionSummary, CliError> {
    let graph = match command.graph {
        NamedGraph::Complete => complete_graph(command.nodes),
        NamedGraph::Cycle => cycle_graph(command.nodes)?,
        NamedGraph::Gnp => gnp_random_graph(
            command.nodes,
            command.probability,
            &mut SmallRng::seed_from_u64(command.seed),
        )?,
    };
    let check = evaluate(&graph, &greedy_largest_first(&graph));

    info!(
        edges = graph.edge_count(),
        verdict = verdict_label(check.verdict),
        "command completed"
    );
    Ok(ExecutionSummary {
        format: command.summary,
        batches: Vec::new(),
        check: Some(CheckReport {
            graph: command.graph,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            check,
        }),
    })
}

/// Parses every requested model before any batch runs.
pub(super) fn resolve_models(raw: &[String]) -> Result<Vec<GraphModel>, BrooksError> {
    if raw.is_empty() {
        return Ok(GraphModel::ALL.to_vec());
    }
    raw.iter().map(|name| name.parse()).collect()
}

pub(super) fn render_config(command: &RunCommand) -> RenderConfig {
    RenderConfig::new(&command.output_dir)
        .with_format(command.format.into())
        .with_layout(command.layout.into())
        .with_layout_seed(command.seed)
        .with_display(command.display)
}

fn run_batches<R: SnapshotRenderer>(
    runner: &BatchRunner,
    models: &[GraphModel],
    command: &RunCommand,
    mut renderer: R,
) -> Result<Vec<BatchReport>, CliError> {
    models
        .iter()
        .map(|&model| -> Result<BatchReport, CliError> {
            let mut outcomes = Vec::new();
            let summary = runner.run_model(
                model,
                command.nodes,
                command.realizations,
                &mut renderer,
                |outcome| {
                    if command.verbose {
                        outcomes.push(*outcome);
                    }
                },
            )?;
            Ok(BatchReport { summary, outcomes })
        })
        .collect()
}

/// Renders `summary` to `writer` in the encoding it was requested with.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use brooks_cli::cli::{Cli, render_summary, run_cli};
/// # use clap::Parser;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli::try_parse_from([
///     "brooks", "run", "--model", "watts", "--nodes", "12", "--realizations", "3", "--no-render",
/// ])?;
/// let mut buffer = Vec::new();
/// render_summary(&run_cli(cli)?, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("Model: WATTS"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        SummaryFormat::Human => {
            for batch in &summary.batches {
                render_batch(batch, &mut writer)?;
            }
            if let Some(report) = &summary.check {
                render_check(report, &mut writer)?;
            }
            Ok(())
        }
        SummaryFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
    }
}

fn render_batch(batch: &BatchReport, mut writer: impl Write) -> io::Result<()> {
    let summary = &batch.summary;
    for outcome in &batch.outcomes {
        writeln!(
            writer,
            "#{index}: edges={edges} Δ={delta} χ={colors} exception={exception} verdict={verdict}",
            index = outcome.index,
            edges = outcome.edge_count,
            delta = outcome.check.max_degree,
            colors = outcome.check.colors_used,
            exception = exception_label(outcome.check.exception),
            verdict = verdict_label(outcome.check.verdict),
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "Model: {}", summary.model.slug().to_uppercase())?;
    writeln!(
        writer,
        "Average Chromatic Number (χ̄): {:.2} ± {:.2}",
        summary.chromatic.mean, summary.chromatic.std_dev
    )?;
    writeln!(
        writer,
        "Average Max Degree (Δ̄): {:.2} ± {:.2}",
        summary.max_degree.mean, summary.max_degree.std_dev
    )?;
    writeln!(
        writer,
        "Heuristic anomalies (χ > Δ): {}/{}",
        summary.anomalies, summary.realizations
    )?;
    writeln!(
        writer,
        "Not applicable (disconnected or exceptional): {}/{}",
        summary.not_applicable, summary.realizations
    )?;
    if summary.snapshots_written > 0 || summary.snapshots_failed > 0 {
        writeln!(
            writer,
            "Snapshots: {} written, {} failed",
            summary.snapshots_written, summary.snapshots_failed
        )?;
    }
    writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))
}

fn render_check(report: &CheckReport, mut writer: impl Write) -> io::Result<()> {
    let check = &report.check;
    writeln!(
        writer,
        "Graph: {} (nodes={}, edges={})",
        report.graph.label(),
        report.node_count,
        report.edge_count
    )?;
    writeln!(writer, "Max Degree (Δ): {}", check.max_degree)?;
    writeln!(writer, "Chromatic Number (χ, greedy): {}", check.colors_used)?;
    writeln!(writer, "Exception: {}", exception_label(check.exception))?;
    writeln!(writer, "Verdict: {}", verdict_label(check.verdict))?;
    writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))
}

const fn exception_label(exception: ExceptionClass) -> &'static str {
    match exception {
        ExceptionClass::None => "none",
        ExceptionClass::Complete => "complete",
        ExceptionClass::OddCycle => "odd_cycle",
    }
}

const fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Satisfied => "satisfied",
        Verdict::Violated => "violated",
        Verdict::NotApplicable => "not_applicable",
    }
}
