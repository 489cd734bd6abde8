//! Command-line interface orchestration for brooks batches.
//!
//! The `run` command executes one batch per requested model, optionally
//! rendering sampled realizations, and reports the statistics as text or
//! JSON. The `check` command evaluates a single named graph.

mod commands;

pub use commands::{
    BatchReport, CheckCommand, CheckReport, Cli, CliError, Command, ExecutionSummary, NamedGraph,
    RunCommand, SnapshotFormat, SnapshotLayout, SummaryFormat, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
