//! Unit tests for argument parsing, batch execution and summary rendering.

use super::commands::{check_command, resolve_models, run_command};
use super::{
    BatchReport, CheckCommand, CheckReport, Cli, CliError, Command, ExecutionSummary, NamedGraph,
    RunCommand, SnapshotFormat, SummaryFormat, render_summary, run_cli,
};

use std::path::PathBuf;

use brooks_core::{
    BatchSummary, BrooksError, ExceptionClass, GraphModel, SampleStatistics, Verdict, evaluate,
    gnp_random_graph, greedy_largest_first,
};
use brooks_test_support::tracing::RecordingLayer;
use clap::Parser;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn parse_run(extra: &[&str]) -> RunCommand {
    let args = ["brooks", "run"].iter().chain(extra).copied();
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Command::Run(run),
        }) => run,
        Ok(other) => panic!("expected the run command, got {other:?}"),
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

fn parse_check(extra: &[&str]) -> CheckCommand {
    let args = ["brooks", "check"].iter().chain(extra).copied();
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Command::Check(check),
        }) => check,
        Ok(other) => panic!("expected the check command, got {other:?}"),
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

fn checked(extra: &[&str]) -> Result<CheckReport, Box<dyn std::error::Error>> {
    check_command(&parse_check(extra))?
        .check
        .ok_or_else(|| "check must produce a report".into())
}

fn run_expecting_error(command: RunCommand, panic_msg: &str) -> CliError {
    match run_command(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

fn rendered(summary: &ExecutionSummary) -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    render_summary(summary, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[rstest]
fn run_defaults_match_reference_batches() {
    let run = parse_run(&[]);
    assert!(run.models.is_empty());
    assert_eq!(run.nodes, 50);
    assert_eq!(run.realizations, 50);
    assert_eq!(run.seed, 0);
    assert_eq!(run.stride, 10);
    assert_eq!(run.neighbours, 4);
    assert!((run.rewire_probability - 0.3).abs() < f64::EPSILON);
    assert_eq!(run.attachments, 2);
    assert_eq!(run.output_dir, PathBuf::from("output_graphs"));
    assert!(!run.no_render);
    assert_eq!(run.format, SnapshotFormat::Svg);
    assert_eq!(run.summary, SummaryFormat::Human);
    assert!(!run.verbose);
}

#[rstest]
#[case::defaults(&[], vec![GraphModel::SmallWorld, GraphModel::ScaleFree])]
#[case::single(&["barabasi"], vec![GraphModel::ScaleFree])]
#[case::ordered(&["barabasi", "Watts"], vec![GraphModel::ScaleFree, GraphModel::SmallWorld])]
fn resolve_models_preserves_request_order(
    #[case] raw: &[&str],
    #[case] expected: Vec<GraphModel>,
) -> TestResult {
    let raw: Vec<String> = raw.iter().map(|name| (*name).to_owned()).collect();
    assert_eq!(resolve_models(&raw)?, expected);
    Ok(())
}

#[rstest]
fn default_run_executes_watts_then_barabasi() -> TestResult {
    let run = parse_run(&["--nodes", "20", "--realizations", "4", "--no-render"]);
    let summary = run_cli(Cli {
        command: Command::Run(run),
    })?;
    let models: Vec<GraphModel> = summary
        .batches
        .iter()
        .map(|batch| batch.summary.model)
        .collect();
    assert_eq!(models, vec![GraphModel::SmallWorld, GraphModel::ScaleFree]);
    assert!(summary.batches.iter().all(|batch| batch.outcomes.is_empty()));
    Ok(())
}

#[rstest]
fn unknown_model_fails_before_any_batch() {
    let dir = temp_dir();
    let output = dir.path().to_string_lossy().into_owned();
    let run = parse_run(&["--model", "watts", "--model", "erdos", "--output-dir", &output]);
    let err = run_expecting_error(run, "unknown model must fail");
    assert!(matches!(
        &err,
        CliError::Core(BrooksError::InvalidModel { provided }) if provided == "erdos"
    ));
    assert_eq!(err.code(), "BROOKS_INVALID_MODEL");
    assert!(!dir.path().join("watts").exists());
}

#[rstest]
#[case::zero_stride(&["--stride", "0"], "BROOKS_INVALID_SAMPLE_STRIDE")]
#[case::wide_lattice(&["--model", "watts", "--nodes", "6", "--neighbours", "8"], "BROOKS_INVALID_MODEL_PARAMETER")]
#[case::zero_nodes(&["--nodes", "0"], "BROOKS_INVALID_NODE_COUNT")]
fn invalid_configuration_reports_stable_code(#[case] args: &[&str], #[case] code: &str) {
    let mut full = vec!["--no-render"];
    full.extend_from_slice(args);
    let err = run_expecting_error(parse_run(&full), "configuration must be rejected");
    assert_eq!(err.code(), code);
}

#[rstest]
fn zero_sized_images_are_rejected_before_running() {
    let dir = temp_dir();
    let mut run = parse_run(&["--model", "watts"]);
    run.output_dir = dir.path().to_path_buf();
    let config = super::commands::render_config(&run).with_size(0, 10);
    let err = match config.build() {
        Ok(_) => panic!("zero width must be rejected"),
        Err(err) => CliError::from(err),
    };
    assert_eq!(err.code(), "RENDER_INVALID_DIMENSIONS");
}

#[rstest]
fn rendering_writes_sampled_snapshots() -> TestResult {
    let dir = temp_dir();
    let output = dir.path().to_string_lossy().into_owned();
    let run = parse_run(&[
        "--model",
        "watts",
        "--nodes",
        "12",
        "--realizations",
        "10",
        "--stride",
        "5",
        "--format",
        "svg",
        "--layout",
        "circular",
        "--output-dir",
        &output,
    ]);
    let summary = run_command(run)?;
    assert_eq!(summary.batches[0].summary.snapshots_written, 2);
    for index in [0, 5] {
        let path = dir.path().join("watts").join(format!("watts_{index}.svg"));
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(!dir.path().join("watts").join("watts_1.svg").exists());
    Ok(())
}

fn fixed_summary(format: SummaryFormat) -> ExecutionSummary {
    ExecutionSummary {
        format,
        batches: vec![BatchReport {
            summary: BatchSummary {
                model: GraphModel::SmallWorld,
                node_count: 50,
                realizations: 50,
                seed: 0,
                chromatic: SampleStatistics {
                    mean: 3.0,
                    std_dev: 0.5,
                },
                max_degree: SampleStatistics {
                    mean: 6.25,
                    std_dev: 1.1,
                },
                anomalies: 0,
                anomaly_ratio: 0.0,
                not_applicable: 2,
                snapshots_written: 5,
                snapshots_failed: 0,
            },
            outcomes: Vec::new(),
        }],
        check: None,
    }
}

#[rstest]
fn human_summary_mirrors_reference_report() -> TestResult {
    let text = rendered(&fixed_summary(SummaryFormat::Human))?;
    let separator = "-".repeat(50);
    let expected = [
        "",
        "Model: WATTS",
        "Average Chromatic Number (χ̄): 3.00 ± 0.50",
        "Average Max Degree (Δ̄): 6.25 ± 1.10",
        "Heuristic anomalies (χ > Δ): 0/50",
        "Not applicable (disconnected or exceptional): 2/50",
        "Snapshots: 5 written, 0 failed",
        separator.as_str(),
        "",
    ]
    .join("\n");
    assert_eq!(text, expected);
    Ok(())
}

#[rstest]
fn json_summary_uses_model_slugs() -> TestResult {
    let text = rendered(&fixed_summary(SummaryFormat::Json))?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let batch = &value["batches"][0];
    assert_eq!(batch["summary"]["model"], "watts");
    assert_eq!(batch["summary"]["not_applicable"], 2);
    assert!(batch.get("outcomes").is_none());
    assert!(value.get("format").is_none());
    Ok(())
}

#[rstest]
fn verbose_run_reports_every_realization() -> TestResult {
    let run = parse_run(&[
        "--model",
        "barabasi",
        "--nodes",
        "15",
        "--realizations",
        "6",
        "--no-render",
        "--verbose",
    ]);
    let summary = run_command(run)?;
    let batch = &summary.batches[0];
    assert_eq!(batch.outcomes.len(), 6);
    assert!(batch.outcomes.iter().all(|outcome| outcome.edge_count == 26));

    let text = rendered(&summary)?;
    assert!(text.starts_with("#0: edges=26 Δ="));
    assert!(text.contains("#5: edges=26"));
    assert!(text.contains("Model: BARABASI"));
    Ok(())
}

#[rstest]
fn verbose_json_includes_outcomes() -> TestResult {
    let mut run = parse_run(&[
        "--model",
        "watts",
        "--nodes",
        "10",
        "--realizations",
        "3",
        "--no-render",
        "--verbose",
    ]);
    run.summary = SummaryFormat::Json;
    let text = rendered(&run_command(run)?)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let outcomes = value["batches"][0]["outcomes"]
        .as_array()
        .map_or(0, Vec::len);
    assert_eq!(outcomes, 3);
    assert!(value["batches"][0]["outcomes"][0]["check"]["verdict"].is_string());
    Ok(())
}

#[rstest]
#[case::format(&["--format", "gif"])]
#[case::summary(&["--summary", "yaml"])]
#[case::layout(&["--layout", "grid"])]
fn clap_rejects_unknown_choices(#[case] extra: &[&str]) {
    let args = ["brooks", "run"].iter().chain(extra).copied();
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn run_command_records_tracing_spans() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let run = parse_run(&["--model", "watts", "--nodes", "10", "--realizations", "2", "--no-render"]);

    tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Run(run),
        })
    })?;

    let execute = layer
        .span("cli.execute")
        .ok_or("cli.execute span must exist")?;
    assert_eq!(execute.fields.get("models"), Some(&"[SmallWorld]".to_owned()));
    assert_eq!(execute.fields.get("render"), Some(&"false".to_owned()));
    let run_span = layer.span("cli.run").ok_or("cli.run span must exist")?;
    assert_eq!(run_span.fields.get("command"), Some(&"run".to_owned()));
    assert!(layer.span("core.run_batch").is_some());
    assert!(layer.has_event(tracing::Level::INFO, "command completed"));
    Ok(())
}

#[rstest]
fn check_defaults_match_reference_random_graph() {
    let check = parse_check(&[]);
    assert_eq!(check.graph, NamedGraph::Gnp);
    assert_eq!(check.nodes, 8);
    assert!((check.probability - 0.4).abs() < f64::EPSILON);
    assert_eq!(check.seed, 0);
    assert_eq!(check.summary, SummaryFormat::Human);
}

#[rstest]
#[case::k5(&["--graph", "complete", "--nodes", "5"], 10, 4, 5, ExceptionClass::Complete)]
#[case::c5(&["--graph", "cycle", "--nodes", "5"], 5, 2, 3, ExceptionClass::OddCycle)]
fn exceptional_graphs_are_not_applicable(
    #[case] args: &[&str],
    #[case] edges: usize,
    #[case] max_degree: usize,
    #[case] colors: usize,
    #[case] exception: ExceptionClass,
) -> TestResult {
    let report = checked(args)?;
    assert_eq!(report.node_count, 5);
    assert_eq!(report.edge_count, edges);
    assert_eq!(report.check.max_degree, max_degree);
    assert_eq!(report.check.colors_used, colors);
    assert_eq!(report.check.exception, exception);
    assert_eq!(report.check.verdict, Verdict::NotApplicable);
    Ok(())
}

#[rstest]
fn seeded_random_graph_matches_direct_evaluation() -> TestResult {
    let args = ["--graph", "gnp", "--nodes", "8", "--probability", "0.4", "--seed", "7"];
    let report = checked(&args)?;
    let again = checked(&args)?;

    let graph = gnp_random_graph(8, 0.4, &mut SmallRng::seed_from_u64(7))?;
    let expected = evaluate(&graph, &greedy_largest_first(&graph));
    assert_eq!(report.node_count, 8);
    assert_eq!(report.edge_count, graph.edge_count());
    assert_eq!(report.check, expected);
    assert_eq!(again.check, report.check);
    assert_eq!(again.edge_count, report.edge_count);
    assert!(report.check.colors_used <= report.check.max_degree + 1);
    Ok(())
}

#[rstest]
#[case::short_cycle(&["--graph", "cycle", "--nodes", "2"])]
#[case::probability(&["--graph", "gnp", "--probability", "1.5"])]
fn invalid_check_parameters_report_stable_code(#[case] args: &[&str]) {
    let err = match check_command(&parse_check(args)) {
        Ok(_) => panic!("parameters must be rejected"),
        Err(err) => err,
    };
    assert_eq!(err.code(), "BROOKS_INVALID_MODEL_PARAMETER");
}

#[rstest]
fn human_check_report_lists_degree_colours_and_verdict() -> TestResult {
    let summary = check_command(&parse_check(&["--graph", "complete", "--nodes", "5"]))?;
    let text = rendered(&summary)?;
    let separator = "-".repeat(50);
    let expected = [
        "Graph: COMPLETE (nodes=5, edges=10)",
        "Max Degree (Δ): 4",
        "Chromatic Number (χ, greedy): 5",
        "Exception: complete",
        "Verdict: not_applicable",
        separator.as_str(),
        "",
    ]
    .join("\n");
    assert_eq!(text, expected);
    Ok(())
}

#[rstest]
fn json_check_report_omits_batches() -> TestResult {
    let summary = check_command(&parse_check(&[
        "--graph", "cycle", "--nodes", "5", "--summary", "json",
    ]))?;
    let value: serde_json::Value = serde_json::from_str(&rendered(&summary)?)?;
    assert!(value.get("batches").is_none());
    assert_eq!(value["check"]["graph"], "cycle");
    assert_eq!(value["check"]["check"]["exception"], "odd_cycle");
    assert_eq!(value["check"]["check"]["verdict"], "not_applicable");
    Ok(())
}

#[rstest]
fn check_records_tracing_spans() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let check = parse_check(&["--graph", "complete", "--nodes", "4"]);

    tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Check(check),
        })
    })?;

    let span = layer.span("cli.check").ok_or("cli.check span must exist")?;
    assert_eq!(span.fields.get("graph"), Some(&"Complete".to_owned()));
    assert_eq!(span.fields.get("nodes"), Some(&"4".to_owned()));
    let run_span = layer.span("cli.run").ok_or("cli.run span must exist")?;
    assert_eq!(run_span.fields.get("command"), Some(&"check".to_owned()));
    Ok(())
}
