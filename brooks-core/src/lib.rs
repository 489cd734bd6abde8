//! Brooks core library.
//!
//! Generates random graphs, colours them greedily, and checks each colouring
//! against Brooks' theorem: a connected graph that is neither complete nor an
//! odd cycle can be coloured with at most `Δ` colours.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the batch runner emits, labelled by
//! `model`:
//!
//! - `brooks_realizations_total` (counter)
//! - `brooks_anomalies_total` (counter)
//! - `brooks_snapshot_failures_total` (counter)

mod batch;
mod coloring;
mod error;
mod generator;
mod graph;
mod named;
mod snapshot;
mod stats;
mod theorem;

pub use crate::{
    batch::{BatchRunner, BatchRunnerBuilder, BatchSummary, RealizationOutcome},
    coloring::{Color, Coloring, greedy_largest_first},
    error::{BrooksError, BrooksErrorCode, ColoringDefect, Result},
    generator::{GraphModel, ModelParams, generate},
    graph::{Graph, NodeId},
    named::{complete_graph, cycle_graph, gnp_random_graph},
    snapshot::{NoSnapshots, Snapshot, SnapshotRenderer, snapshot_path, snapshot_title},
    stats::{BatchStatistics, SampleStatistics},
    theorem::{ExceptionClass, TheoremCheck, Verdict, check, classify, evaluate},
};
